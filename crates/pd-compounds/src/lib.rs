//! pd-compounds: tabulated thermophysical constants for phasediagram.
//!
//! Provides:
//! - `CompoundRecord`: one dataset row in its tabulated units
//! - `Dataset`: an explicitly constructed, read-only set of records with
//!   exact-match lookup by name, formula, or CAS registry number
//! - `normalize`: conversion of a record into the internal unit system
//!   (K, Pa, J/mol, cm³/mol), resolving fallback columns once
//!
//! # Example
//!
//! ```no_run
//! use pd_compounds::{Dataset, normalize};
//!
//! let dataset = Dataset::builtin().unwrap();
//! let record = dataset.resolve("H2O").unwrap();
//! let water = normalize(record).unwrap();
//! println!("Triple point: {} K", water.triple.temperature_k);
//! ```

pub mod dataset;
pub mod error;
pub mod normalize;
pub mod record;

// Re-exports for ergonomics
pub use dataset::Dataset;
pub use error::{CompoundError, CompoundResult};
pub use normalize::{
    AntoineFit, Compound, EnthalpySource, MeltingVolume, PhasePoint, VaporizationEnthalpy,
    VolumeSource, normalize,
};
pub use record::{AntoineBasis, CompoundRecord};
