//! Curve evaluation errors.

use pd_core::PdError;
use thiserror::Error;

/// Result type for curve evaluation.
pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A property the requested curve needs is undefined for the compound.
    #[error("Missing data for '{compound}': {what}")]
    MissingData { compound: String, what: &'static str },

    /// Bad sampling range or sample count.
    #[error("Invalid range: {what}")]
    InvalidRange { what: &'static str },

    #[error(transparent)]
    Numeric(#[from] PdError),
}

impl CurveError {
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CurveError::MissingData {
            compound: "ammonia".into(),
            what: "melting volume",
        };
        assert!(err.to_string().contains("ammonia"));
        assert!(err.to_string().contains("melting volume"));
        assert!(err.is_missing_data());
    }

    #[test]
    fn numeric_error_is_transparent() {
        let err: CurveError = PdError::NonFinite {
            what: "pressure",
            value: f64::NAN,
        }
        .into();
        assert!(err.to_string().contains("Non-finite"));
        assert!(!err.is_missing_data());
    }
}
