//! Compound dataset errors.

use thiserror::Error;

/// Result type for dataset and normalization operations.
pub type CompoundResult<T> = Result<T, CompoundError>;

/// Errors that can occur while loading, resolving, or normalizing compounds.
#[derive(Error, Debug)]
pub enum CompoundError {
    /// No record matches the identifier in any identification field.
    #[error("No compound matches identifier '{identifier}'")]
    NotFound { identifier: String },

    /// A record violates a dataset invariant.
    #[error("Invalid record for '{compound}': {what}")]
    InvalidRecord { compound: String, what: &'static str },

    /// File I/O error.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// CSV parsing error.
    #[error("CSV parsing error for '{origin}': {source}")]
    Csv { origin: String, source: csv::Error },

    /// YAML parsing error (single compound files).
    #[error("YAML parsing error for '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CompoundError::NotFound {
            identifier: "unobtainium".into(),
        };
        assert!(err.to_string().contains("unobtainium"));

        let err = CompoundError::InvalidRecord {
            compound: "water".into(),
            what: "critical temperature must exceed triple temperature",
        };
        assert!(err.to_string().contains("water"));
    }
}
