//! Multi-award paragraph decomposition.
//!
//! A multi-award paragraph lists several companies, each followed by its
//! own identifier, ahead of one shared narrative:
//!
//! ```text
//! AOC Solutions Inc.,* Fairfax, Virginia (SP4704-23-A-0500); Lynch
//! Consultants LLC,* Arlington, Virginia (SP4704-23-A-0503); and ... are
//! sharing an estimated $181,125,713 firm-fixed-price agreement ...
//! ```
//!
//! Identifiers act as delimiters: each one closes a chunk, and every short
//! chunk yields one company and one identifier.

use regex::Regex;
use std::sync::LazyLock;

use crate::company::extract_company;
use crate::identifier::extract_identifier;
use crate::rules::Rules;
use crate::text::{char_len, split_tail, tokenize};

/// First parenthesized clause of a chunk.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("valid regex"));

/// One company recovered from a multi-award chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardParty {
    pub company: String,
    pub identifier: String,
}

/// Result of decomposing a multi-award paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Companies in paragraph order.
    Accepted(Vec<AwardParty>),

    /// A chunk had an identifier but no company name; the whole paragraph
    /// yields nothing.
    Aborted,
}

/// Mark every strict identifier token as a chunk boundary.
///
/// The token's final character is replaced with `;`, and the tokens are
/// rejoined with single spaces.
pub fn insert_delimiters(tokens: &[&str], rules: &Rules) -> String {
    tokens
        .iter()
        .map(|token| {
            if rules.is_delimiter_identifier(token) {
                let mut chars = token.chars();
                chars.next_back();
                format!("{};", chars.as_str())
            } else {
                (*token).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a multi-award paragraph into per-company chunk candidates.
pub fn split_chunks(tokens: &[&str], rules: &Rules) -> Vec<String> {
    insert_delimiters(tokens, rules)
        .split(';')
        .map(str::to_string)
        .collect()
}

/// Text inside the first parenthesized clause, with spaces removed.
fn parenthesized_text(chunk: &str) -> Option<String> {
    PARENTHESIZED
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(' ', ""))
}

/// Cut a chunk down to its company fragment.
///
/// Text from the first "award" onward is shared narrative and is dropped.
/// Fragments that are still too long are rejected. The parenthesized
/// clause is appended so an identifier written with inner spaces survives
/// tokenization.
pub fn prepare_chunk(chunk: &str, rules: &Rules) -> Option<String> {
    let truncated = chunk
        .split(rules.award_marker.as_str())
        .next()
        .unwrap_or(chunk);

    if !rules.is_company_fragment(truncated) {
        return None;
    }

    let extra = parenthesized_text(truncated).unwrap_or_default();
    Some(format!("{truncated} {extra}"))
}

/// Decompose a multi-award paragraph into companies and identifiers.
///
/// Chunks without an identifier are skipped. A chunk with an identifier but
/// an empty company name aborts the whole paragraph.
pub fn split_multi_award(tokens: &[&str], rules: &Rules) -> SplitOutcome {
    let mut parties = Vec::new();

    for chunk in split_chunks(tokens, rules) {
        let Some(prepared) = prepare_chunk(&chunk, rules) else {
            continue;
        };
        let words = tokenize(&prepared);

        let Some(identifier) =
            extract_identifier(&words, rules).filter(|id| char_len(id) > 1)
        else {
            continue;
        };

        let company = extract_company(&words, rules);
        if company.is_empty() {
            tracing::warn!(
                chunk = %chunk.trim(),
                identifier = %identifier,
                "Multi-award chunk has no company name, dropping paragraph"
            );
            return SplitOutcome::Aborted;
        }

        parties.push(AwardParty {
            company,
            identifier,
        });
    }

    SplitOutcome::Accepted(parties)
}

/// Combine the shared base of the first identifier with another
/// identifier's 4-character order suffix.
///
/// # Examples
/// ```
/// use dodaward_extractor::splitter::compose_identifier;
///
/// assert_eq!(
///     compose_identifier("SP4704-23-A-0500", "SP4704-23-A-0503"),
///     "SP4704-23-A-0503"
/// );
/// assert_eq!(
///     compose_identifier("W912DY-23-D-0001", "W912DY-23-F-0042"),
///     "W912DY-23-D-0042"
/// );
/// ```
pub fn compose_identifier(first: &str, current: &str) -> String {
    let (base, _) = split_tail(first, 4);
    let (_, suffix) = split_tail(current, 4);
    format!("{base}{suffix}")
}
