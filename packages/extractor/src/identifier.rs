//! Procurement identifier extraction and normalization.
//!
//! Identifiers appear in many spellings: `(N0001922C1234)`,
//! `(N00019-22-C-1234).`, joined as `N0001922C1234/N0001922C1235`, or split
//! by typographic hyphens. Each token is cleaned, tested against the rule
//! table, and the last match in scan order wins. Later mentions in a clause
//! usually name the base agreement after an order number.

use crate::rules::{Rules, IDENTIFIER_STRIP_CHARS};
use crate::text::strip_chars;

/// Strip punctuation, hyphen variants and whitespace from a token.
pub fn clean_token(token: &str) -> String {
    strip_chars(token, IDENTIFIER_STRIP_CHARS)
}

/// Insert segment hyphens into a cleaned identifier.
///
/// Without hyphens, the text is cut after 6 and 8 characters
/// (`XXXXXX-YY-...`). When the fifth character from the end is an uppercase
/// letter, a hyphen also splits the 4-character suffix from its modifier.
/// Normalizing an already normalized identifier is a no-op.
///
/// # Examples
/// ```
/// use dodaward_extractor::identifier::normalize_identifier;
///
/// assert_eq!(normalize_identifier("N0001922C1234"), "N00019-22-C-1234");
/// assert_eq!(normalize_identifier("N00019-22-C-1234"), "N00019-22-C-1234");
/// ```
pub fn normalize_identifier(key: &str) -> String {
    let mut chars: Vec<char> = key.chars().collect();

    if !chars.contains(&'-') {
        let head: String = chars.iter().take(6).collect();
        let year: String = chars.iter().skip(6).take(2).collect();
        let rest: String = chars.iter().skip(8).collect();
        chars = format!("{head}-{year}-{rest}").chars().collect();
    }

    if chars.len() >= 5 && chars[chars.len() - 5].is_uppercase() {
        chars.insert(chars.len() - 4, '-');
    }

    chars.into_iter().collect()
}

/// Scan tokens for a procurement identifier.
///
/// Returns the normalized form of the last candidate found, or `None` when
/// no token qualifies. Tokens that join identifiers with `/` are split and
/// scanned recursively; a designator such as `AN/APG-81` is never split.
pub fn extract_identifier<S: AsRef<str>>(tokens: &[S], rules: &Rules) -> Option<String> {
    let mut found = None;

    for token in tokens {
        let cleaned = clean_token(rules.rewrite_fragment(token.as_ref()));

        if rules.is_identifier_candidate(&cleaned) {
            found = Some(normalize_identifier(&cleaned));
        } else if rules.is_joint_identifier(&cleaned) {
            if let Some(joint) = extract_joint_identifier(&cleaned, rules) {
                found = Some(joint);
            }
        }
    }

    found
}

/// Scan the `/`-separated parts of a joint identifier token.
pub fn extract_joint_identifier(cleaned: &str, rules: &Rules) -> Option<String> {
    let parts: Vec<&str> = cleaned.split('/').collect();
    extract_identifier(&parts, rules)
}
