//! Error types for the harvester.
//!
//! Uses the dual-error pattern: `HarvesterError` for library consumers
//! with detailed error context, and `ExtractError` from the extraction
//! core wrapped transparently.

use dodaward_extractor::ExtractError;
use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid article ID format.
    #[error("Invalid article ID: '{0}'. Expected digits only (e.g., 3251958)")]
    InvalidArticleId(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts for a URL failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Missing required HTML element.
    #[error("Missing required HTML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Extraction from a parsed page failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvesterError::InvalidArticleId("abc".to_string());
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("digits only"));
    }

    #[test]
    fn test_missing_element_display() {
        let err = HarvesterError::MissingElement {
            element: "h1.maintitle".to_string(),
            context: "3251958.html".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required HTML element: h1.maintitle in 3251958.html"
        );
    }

    #[test]
    fn test_extract_error_is_transparent() {
        let inner = ExtractError::UnparseableDate {
            title: "Contracts For Today".to_string(),
            phrase: "Today".to_string(),
        };
        let expected = inner.to_string();
        let err = HarvesterError::from(inner);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = HarvesterError::RetriesExhausted {
            attempts: 2,
            message: "Server error: 503 Service Unavailable".to_string(),
        };
        assert!(err.to_string().starts_with("Request failed after 2 attempts"));
    }
}
