//! pd-core: stable foundation for phasediagram.
//!
//! Contains:
//! - units (uom SI conversions, display units, physical constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PdError, PdResult};
pub use numeric::*;
pub use units::{PressureUnit, TemperatureUnit};
