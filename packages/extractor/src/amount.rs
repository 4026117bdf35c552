//! Dollar amount extraction.

use crate::rules::Rules;
use crate::text::digits_only;

/// Parse a digit string into an amount.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::warn!(digits, error = %e, "Dollar figure does not fit in an amount");
            None
        }
    }
}

/// Find the dollar amount of a paragraph.
///
/// The first token carrying a currency symbol supplies the digits; when the
/// symbol stands alone, the following token supplies them instead. Only
/// when no token carries a symbol, the tokens right after the first "award"
/// are inspected and the longest digit run among them wins.
///
/// # Examples
/// ```
/// use dodaward_extractor::amount::extract_amount;
/// use dodaward_extractor::rules::Rules;
///
/// let rules = Rules::default();
/// assert_eq!(extract_amount(&["is", "awarded", "a", "$39,920,367"], &rules), Some(39_920_367));
/// assert_eq!(extract_amount(&["is", "awarded", "$", "1,500"], &rules), Some(1_500));
/// ```
pub fn extract_amount<S: AsRef<str>>(tokens: &[S], rules: &Rules) -> Option<u64> {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

    if let Some(i) = tokens.iter().position(|t| rules.has_currency_symbol(t)) {
        let mut digits = digits_only(tokens[i]);
        if digits.is_empty() {
            digits = tokens.get(i + 1).map(|t| digits_only(t)).unwrap_or_default();
        }
        return parse_digits(&digits);
    }

    fallback_amount(&tokens, rules)
}

/// Longest digit run among the tokens following the first "award".
fn fallback_amount(tokens: &[&str], rules: &Rules) -> Option<u64> {
    let start = tokens.iter().position(|t| rules.mentions_award(t))?;

    let mut best = String::new();
    for offset in 1..=rules.fallback_window {
        let digits = tokens.get(start + offset).map(|t| digits_only(t)).unwrap_or_default();
        if digits.len() > best.len() {
            best = digits;
        }
    }

    tracing::debug!(digits = %best, "No currency symbol, used award fallback");
    parse_digits(&best)
}

/// Split a shared amount evenly across `companies` awardees.
///
/// Integer division; the remainder is dropped. A missing amount stays
/// missing.
pub fn apportion(amount: Option<u64>, companies: usize) -> Option<u64> {
    match u64::try_from(companies) {
        Ok(n) if n > 0 => amount.map(|total| total / n),
        _ => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    fn amount(text: &str) -> Option<u64> {
        extract_amount(&tokenize(text), &Rules::default())
    }

    #[test]
    fn test_amount_with_dollar_sign() {
        assert_eq!(
            amount("Acme Corp., Reston, Virginia, is awarded a $5,000,000 firm-fixed-price contract"),
            Some(5_000_000)
        );
    }

    #[test]
    fn test_amount_first_symbol_wins() {
        assert_eq!(
            amount("is awarded $8,869,507; and fiscal 2020 funds in the amount of $31,050,860"),
            Some(8_869_507)
        );
    }

    #[test]
    fn test_amount_detached_symbol() {
        assert_eq!(amount("is awarded a $ 12,500,000 contract"), Some(12_500_000));
    }

    #[test]
    fn test_amount_euro() {
        assert_eq!(amount("is awarded a €4,200,000 contract"), Some(4_200_000));
    }

    #[test]
    fn test_amount_symbol_in_last_token() {
        assert_eq!(amount("total value of $750,000"), Some(750_000));
    }

    #[test]
    fn test_amount_symbol_without_digits_is_missing() {
        // The symbol exists, so the award fallback is not consulted.
        assert_eq!(amount("is awarded 5000000 in $"), None);
    }

    #[test]
    fn test_amount_fallback_after_award() {
        assert_eq!(
            amount("Acme Corp., Reston, Virginia, is awarded 5000000 pursuant to the agreement."),
            Some(5_000_000)
        );
    }

    #[test]
    fn test_amount_fallback_picks_longest() {
        assert_eq!(amount("was awarded 12 contracts worth 4,500,000 dollars"), Some(12));
        assert_eq!(amount("was awarded 12 for 4,500,000 dollars"), Some(4_500_000));
    }

    #[test]
    fn test_amount_fallback_short_sequence() {
        assert_eq!(amount("awarded 250000"), Some(250_000));
    }

    #[test]
    fn test_amount_fallback_is_case_sensitive() {
        assert_eq!(amount("Awarded 250000 today"), None);
    }

    #[test]
    fn test_amount_missing() {
        assert_eq!(amount("Acme Corp., Reston, Virginia, is the contracting activity."), None);
    }

    #[test]
    fn test_amount_overflow_is_missing() {
        assert_eq!(amount("is awarded $123456789012345678901234567890"), None);
    }

    #[test]
    fn test_apportion() {
        assert_eq!(apportion(Some(9_000_000), 3), Some(3_000_000));
        assert_eq!(apportion(Some(10), 3), Some(3));
        assert_eq!(apportion(None, 3), None);
        assert_eq!(apportion(Some(10), 0), Some(10));
    }
}
