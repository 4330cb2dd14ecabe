//! Store error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the durable store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure reading or writing a store file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The query source has no recognizable city column.
    #[error("query source {path} has no City column")]
    MissingCityColumn {
        /// Path of the offending file
        path: String,
    },

    /// The query source yielded no usable queries.
    #[error("query source {path} contains no queries")]
    EmptyQuerySource {
        /// Path of the offending file
        path: String,
    },

    /// Checkpoint (de)serialization failed.
    #[error("checkpoint serialization failed: {0}")]
    Checkpoint(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::MissingCityColumn {
            path: "cities.csv".to_string(),
        };
        assert_eq!(err.to_string(), "query source cities.csv has no City column");
    }
}
