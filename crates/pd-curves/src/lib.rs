//! pd-curves: phase-boundary curve evaluation for phasediagram.
//!
//! Four independent evaluators turn a normalized [`pd_compounds::Compound`]
//! into sampled (T, P) curves: solid-liquid, solid-vapor and liquid-vapor by
//! Clausius-Clapeyron, and liquid-vapor by the Antoine correlation. They are
//! pure functions of the compound; nothing is cached or mutated.
//!
//! # Example
//!
//! ```no_run
//! use pd_compounds::{Dataset, normalize};
//! use pd_curves::CurveEngine;
//!
//! let dataset = Dataset::builtin().unwrap();
//! let water = normalize(dataset.resolve("water").unwrap()).unwrap();
//! let curve = CurveEngine::new().liquid_vapor_clapeyron(&water).unwrap();
//! for (t, p) in curve.points() {
//!     println!("{t:.2} K  {p:.1} Pa");
//! }
//! ```

pub mod curve;
pub mod engine;
pub mod error;
pub mod sampling;

// Re-exports for ergonomics
pub use curve::{Curve, CurveKind};
pub use engine::{
    CurveEngine, CurveRequest, DEFAULT_MELTING_RANGE_K, DEFAULT_SUBLIMATION_RANGE_K,
};
pub use error::{CurveError, CurveResult};
pub use sampling::{DEFAULT_SAMPLES, SampleGrid};
