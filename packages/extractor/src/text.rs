//! Token helpers shared by the field extractors.

/// Split a paragraph into word tokens.
///
/// Splits on single ASCII spaces only, so doubled spaces yield empty tokens
/// and non-breaking spaces, tabs and line breaks stay inside their token.
/// The extractors rely on both properties.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Whether a token is "all uppercase".
///
/// True when the token has at least one cased character and no lowercase
/// characters. Digits and punctuation are ignored, so `N0001922C1234` is
/// uppercase while `2022` is not.
///
/// # Examples
/// ```
/// use dodaward_extractor::text::is_upper;
///
/// assert!(is_upper("N0001922C1234"));
/// assert!(!is_upper("2022"));
/// assert!(!is_upper("Navy"));
/// ```
pub fn is_upper(token: &str) -> bool {
    let mut has_cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Remove every occurrence of the given characters.
pub fn strip_chars(token: &str, chars: &[char]) -> String {
    token.chars().filter(|c| !chars.contains(c)).collect()
}

/// Keep only ASCII digits.
pub fn digits_only(token: &str) -> String {
    token.chars().filter(char::is_ascii_digit).collect()
}

/// Length in characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split off the last `n` characters, returning `(head, tail)`.
///
/// When the text is shorter than `n` the head is empty.
pub fn split_tail(text: &str, n: usize) -> (&str, &str) {
    let len = char_len(text);
    if len <= n {
        return ("", text);
    }
    let idx = text
        .char_indices()
        .nth(len - n)
        .map_or(text.len(), |(i, _)| i);
    text.split_at(idx)
}
