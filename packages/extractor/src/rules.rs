//! Heuristic rule table for paragraph extraction.
//!
//! Every threshold and marker the extractors rely on lives here, so each
//! heuristic can be tested and tuned without touching control flow.
//! [`Rules::default`] carries the values observed to work on the daily
//! contract announcements.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::{char_len, is_upper, strip_chars};

/// Characters removed from a token before it is tested as an identifier.
pub const IDENTIFIER_STRIP_CHARS: &[char] = &[
    '(', ')', '.', ',', ' ', '\u{2010}', '\u{2011}', '-', '\r', '\n', '\u{a0}', '\t',
];

/// Characters removed from a token before the multi-award count.
pub const CLASSIFIER_STRIP_CHARS: &[char] = &['(', ')', '.', ','];

/// Characters removed from a token before the strict delimiter test.
pub const DELIMITER_STRIP_CHARS: &[char] = &['(', ')', '.', ',', ';'];

/// Strict identifier pattern used to delimit companies in multi-award paragraphs.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DELIMITER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{6}-\d{2}-\w{1,2}-\w{4}$").expect("valid regex")
});

/// Canonical shape of an emitted procurement identifier.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CANONICAL_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{6}-\d{2}-[A-Z0-9]{1,2}-[A-Z0-9]{4}$").expect("valid regex")
});

/// Declarative table of extraction heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Number of opening tokens scanned for a correction marker.
    pub correction_window: usize,

    /// Lowercase markers that flag a correction notice.
    pub correction_markers: Vec<String>,

    /// Marker separating the company list from the shared narrative.
    pub award_marker: String,

    /// A stripped uppercase token longer than this counts toward the
    /// multi-award test.
    pub multi_award_token_len: usize,

    /// Minimum length of a cleaned identifier candidate.
    pub identifier_min_len: usize,

    /// Length of the abbreviated identifier exception.
    pub abbreviated_identifier_len: usize,

    /// Substring an abbreviated identifier must contain.
    pub abbreviated_identifier_marker: String,

    /// Aircraft type designator prefix; a `/` after it is not a joint identifier.
    pub designator_marker: String,

    /// Truncated multi-award chunks at or above this many characters are
    /// narrative, not a "name, location (ID)" fragment.
    pub max_chunk_chars: usize,

    /// Digit run length that marks a dollar figure.
    pub dollar_figure_digits: usize,

    /// Tokens inspected after the award marker when no currency symbol exists.
    pub fallback_window: usize,

    /// Currency symbols that open a dollar figure.
    pub currency_symbols: Vec<char>,

    /// Identifier fragments broken by the source markup, with their full text.
    pub fragment_rewrites: Vec<(String, String)>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            correction_window: 10,
            correction_markers: vec!["correction".to_string(), "update".to_string()],
            award_marker: "award".to_string(),
            multi_award_token_len: 12,
            identifier_min_len: 12,
            abbreviated_identifier_len: 11,
            abbreviated_identifier_marker: "HEVA".to_string(),
            designator_marker: "AN/".to_string(),
            max_chunk_chars: 110,
            dollar_figure_digits: 6,
            fallback_window: 3,
            currency_symbols: vec!['$', '€'],
            fragment_rewrites: vec![(
                "(FA4814\u{2010}".to_string(),
                "(FA4814\u{2010}17\u{2010}C\u{2010}0002).".to_string(),
            )],
        }
    }
}

impl Rules {
    /// Whether a token flags a correction notice (case-insensitive).
    #[must_use]
    pub fn is_correction_marker(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.correction_markers.iter().any(|m| lower.contains(m.as_str()))
    }

    /// Whether a token contains the award marker (case-sensitive).
    #[must_use]
    pub fn mentions_award(&self, token: &str) -> bool {
        token.contains(self.award_marker.as_str())
    }

    /// Whether a token contains the award marker in any case.
    #[must_use]
    pub fn mentions_award_ignore_case(&self, token: &str) -> bool {
        token.to_lowercase().contains(self.award_marker.as_str())
    }

    /// Whether a token looks like one entry of a multi-award identifier list.
    #[must_use]
    pub fn is_listed_identifier(&self, token: &str) -> bool {
        let stripped = strip_chars(token, CLASSIFIER_STRIP_CHARS);
        char_len(&stripped) > self.multi_award_token_len && is_upper(&stripped)
    }

    /// Whether a cleaned token is a plain identifier candidate.
    #[must_use]
    pub fn is_identifier_candidate(&self, cleaned: &str) -> bool {
        let len = char_len(cleaned);
        let long_enough = len >= self.identifier_min_len
            || (len == self.abbreviated_identifier_len
                && cleaned.contains(self.abbreviated_identifier_marker.as_str()));
        long_enough && is_upper(cleaned) && !cleaned.contains('/')
    }

    /// Whether a cleaned token joins several identifiers with `/`.
    #[must_use]
    pub fn is_joint_identifier(&self, cleaned: &str) -> bool {
        char_len(cleaned) >= self.identifier_min_len
            && is_upper(cleaned)
            && cleaned.contains('/')
            && !cleaned.contains(self.designator_marker.as_str())
    }

    /// Whether a token is a company delimiter in a multi-award paragraph.
    #[must_use]
    pub fn is_delimiter_identifier(&self, token: &str) -> bool {
        let stripped = strip_chars(token, DELIMITER_STRIP_CHARS);
        char_len(&stripped) > self.identifier_min_len
            && is_upper(&stripped)
            && !stripped.contains('/')
            && DELIMITER_PATTERN.is_match(&stripped)
    }

    /// Whether a token carries a dollar figure. Commas are ignored.
    #[must_use]
    pub fn is_dollar_figure(&self, token: &str) -> bool {
        let mut run = 0;
        for c in token.chars().filter(|c| *c != ',') {
            if c.is_ascii_digit() {
                run += 1;
                if run >= self.dollar_figure_digits {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }

    /// Whether a token contains a currency symbol.
    #[must_use]
    pub fn has_currency_symbol(&self, token: &str) -> bool {
        token.chars().any(|c| self.currency_symbols.contains(&c))
    }

    /// Whether a truncated multi-award chunk is short enough to be a
    /// company fragment.
    #[must_use]
    pub fn is_company_fragment(&self, chunk: &str) -> bool {
        char_len(chunk) < self.max_chunk_chars
    }

    /// Full text for a known broken identifier fragment, if any.
    #[must_use]
    pub fn rewrite_fragment<'a>(&'a self, token: &'a str) -> &'a str {
        self.fragment_rewrites
            .iter()
            .find(|(fragment, _)| fragment == token)
            .map_or(token, |(_, full)| full.as_str())
    }
}

/// Whether a normalized identifier has the canonical `6-2-1/2-4` shape.
///
/// # Examples
/// ```
/// use dodaward_extractor::rules::is_canonical_identifier;
///
/// assert!(is_canonical_identifier("N00019-22-C-1234"));
/// assert!(!is_canonical_identifier("ABCDEF-12-GHIJ-KLMN"));
/// ```
pub fn is_canonical_identifier(identifier: &str) -> bool {
    CANONICAL_IDENTIFIER.is_match(identifier)
}
