//! Fiscal year derivation and the identifier/fiscal-year invariant.

use crate::rules::is_canonical_identifier;

/// Derive the 2-digit fiscal year from a normalized identifier.
///
/// Returns the first hyphen-separated segment of exactly two characters
/// whose value lies strictly between 0 and 100.
///
/// # Examples
/// ```
/// use dodaward_extractor::fiscal_year::fiscal_year;
///
/// assert_eq!(fiscal_year("N68171-22-D-H009"), Some("22".to_string()));
/// assert_eq!(fiscal_year(""), None);
/// ```
pub fn fiscal_year(identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return None;
    }
    identifier
        .split('-')
        .filter(|segment| segment.chars().count() == 2)
        .find(|segment| {
            segment
                .parse::<u32>()
                .is_ok_and(|year| year > 0 && year < 100)
        })
        .map(str::to_string)
}

/// Pair an identifier with its fiscal year, degrading both together.
///
/// An identifier without a recoverable fiscal year, or one that does not
/// have the canonical `6-2-1/2-4` shape, is malformed: both fields become
/// absent.
pub fn reconcile(identifier: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(identifier) = identifier else {
        return (None, None);
    };

    match fiscal_year(identifier) {
        Some(year) if is_canonical_identifier(identifier) => {
            (Some(year), Some(identifier.to_string()))
        }
        Some(_) => {
            tracing::debug!(identifier, "Identifier has a fiscal year but a malformed shape");
            (None, None)
        }
        None => {
            tracing::debug!(identifier, "No fiscal year segment in identifier");
            (None, None)
        }
    }
}
