//! Awardee name extraction.
//!
//! Announcements open with the awardee: `"Acme Corp., Reston, Virginia, is
//! awarded ..."`. The name is every word up to the first comma.

use crate::rules::Rules;

/// Punctuation trimmed from the end of an assembled name.
const NAME_TERMINATORS: &[char] = &[',', '.', '*'];

/// Assemble the awardee name from the opening tokens.
///
/// Dollar figures are skipped. The first comma-bearing token ends the name
/// and loses its final character. Connective filler (any token containing
/// "and", or an internal space) is skipped. If no comma ever appears, the
/// partial name gathered so far is returned. The result is trimmed of
/// whitespace and trailing terminator punctuation and may be empty.
///
/// # Examples
/// ```
/// use dodaward_extractor::company::extract_company;
/// use dodaward_extractor::rules::Rules;
///
/// let tokens = ["Black", "Construction-Tutor", "Perini", "JV,", "Harmon,", "Guam,"];
/// assert_eq!(
///     extract_company(&tokens, &Rules::default()),
///     "Black Construction-Tutor Perini JV"
/// );
/// ```
pub fn extract_company<S: AsRef<str>>(tokens: &[S], rules: &Rules) -> String {
    let mut name = String::new();
    let mut terminated = false;

    for token in tokens.iter().map(AsRef::as_ref) {
        if token.is_empty() || rules.is_dollar_figure(token) {
            continue;
        }
        if token.contains(',') {
            let mut chars = token.chars();
            chars.next_back();
            name.push_str(chars.as_str());
            terminated = true;
            break;
        }
        if token.contains("and") || token.trim().contains(' ') {
            continue;
        }
        name.push_str(token);
        name.push(' ');
    }

    if !terminated {
        tracing::debug!(partial = %name.trim(), "No comma found, keeping partial company name");
    }

    name.trim()
        .trim_end_matches(NAME_TERMINATORS)
        .trim_end()
        .to_string()
}
