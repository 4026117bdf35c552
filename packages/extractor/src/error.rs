//! Error types for the extraction engine.
//!
//! Only document-level failures are errors. Field-level misses degrade to
//! the `N/A` sentinel and never surface here.

use thiserror::Error;

/// Main error type for the extraction engine.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page title did not contain a recognizable date phrase.
    #[error("Unparseable date in title '{title}' (reconstructed phrase: '{phrase}')")]
    UnparseableDate { title: String, phrase: String },

    /// The date phrase named a day that does not exist.
    #[error("Invalid calendar date {year}-{month:02}-{day:02} in title '{title}'")]
    InvalidCalendarDate {
        title: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
