//! Pipeline error types.

use jobsift_browser::BrowserError;
use jobsift_store::StoreError;
use thiserror::Error;

/// Result type alias using [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that abort a query.
///
/// Per-field and per-card misses never surface here; they resolve to field
/// defaults inside the extractor.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The results container never became visible on a page. Fatal for the
    /// query; not retried, no partial-page salvage.
    #[error("results container never became visible for query {query}")]
    ResultsNotVisible {
        /// The query being scraped
        query: String,
    },

    /// The configured search base URL could not be parsed.
    #[error("invalid search base URL: {0}")]
    InvalidBaseUrl(String),

    /// Browser-level failure outside any recoverable extraction step.
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// The record sink rejected an append.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::ResultsNotVisible {
            query: "Toronto".to_string(),
        };
        assert!(err.to_string().contains("Toronto"));
    }

    #[test]
    fn test_browser_error_conversion() {
        let err: ScrapeError = BrowserError::Timeout("selector".to_string()).into();
        assert!(matches!(err, ScrapeError::Browser(_)));
    }
}
