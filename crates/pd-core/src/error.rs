//! Shared numeric and unit errors.

use thiserror::Error;

/// Result type for pd-core helpers.
pub type PdResult<T> = Result<T, PdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdError {
    /// NaN or infinite where a finite number is required.
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Finite but out of the accepted domain.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Unrecognized unit symbol when parsing a display unit.
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: &'static str },
}
