//! Core data types for the extraction engine.

use serde::{Deserialize, Serialize};

/// Sentinel rendered in place of an unrecoverable field value.
pub const NOT_AVAILABLE: &str = "N/A";

/// A contract announcement page, as handed over by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Title heading text, e.g. "Contracts For Oct. 24, 2022".
    pub title: String,

    /// Body paragraphs in page order.
    pub paragraphs: Vec<String>,

    /// Where the page came from (URL or id).
    pub source_ref: String,
}

impl Document {
    /// Create a new document.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        paragraphs: Vec<String>,
        source_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            paragraphs,
            source_ref: source_ref.into(),
        }
    }
}

/// One award recovered from a paragraph or a multi-award chunk.
///
/// `fiscal_year` and `procurement_id` are either both present or both
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    /// Announcement date as `YYYYMMDD`.
    pub date: String,

    /// Two-digit fiscal year.
    pub fiscal_year: Option<String>,

    /// Awardee name, possibly empty.
    pub company: String,

    /// Dollar amount.
    pub amount: Option<u64>,

    /// Normalized procurement identifier.
    pub procurement_id: Option<String>,

    /// Source reference of the containing document.
    pub source_ref: String,
}

/// A paragraph recognized as a correction notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// Announcement date as `YYYYMMDD`.
    pub date: String,

    /// The full paragraph text.
    pub paragraph: String,
}

/// Append-only accumulator for one processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub awards: Vec<AwardRecord>,
    pub corrections: Vec<CorrectionRecord>,
}

impl Extraction {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every record of `other`, preserving its order.
    pub fn absorb(&mut self, other: Extraction) {
        self.awards.extend(other.awards);
        self.corrections.extend(other.corrections);
    }

    /// Whether no records have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.awards.is_empty() && self.corrections.is_empty()
    }
}

/// Render an optional field, substituting the sentinel.
///
/// # Examples
/// ```
/// use dodaward_extractor::types::or_sentinel;
///
/// assert_eq!(or_sentinel(Some(&"22")), "22");
/// assert_eq!(or_sentinel::<u64>(None), "N/A");
/// ```
pub fn or_sentinel<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}
