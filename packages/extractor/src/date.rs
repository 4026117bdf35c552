//! Announcement date recovery from page titles.
//!
//! Titles look like `"Contracts For Oct. 24, 2022"`, usually padded with
//! line breaks and indentation. The boilerplate is dropped, the remaining
//! words are rebuilt into a date phrase, and the phrase is parsed into a
//! calendar date rendered as an 8-digit `YYYYMMDD` code.

use chrono::NaiveDate;

use crate::error::{ExtractError, Result};

/// Boilerplate words that never belong to the date phrase.
const TITLE_BOILERPLATE: &[&str] = &["Contracts", "For"];

/// Month names, lowercase, in calendar order.
const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Weekday names, tolerated and ignored inside a date phrase.
const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Rebuild the date phrase from a title.
///
/// Words of two characters or fewer are dropped, as are the boilerplate
/// words. A numeric word longer than three characters (the year) is
/// appended as-is; any other word loses its commas and gains a trailing
/// space.
///
/// # Examples
/// ```
/// use dodaward_extractor::date::reconstruct_phrase;
///
/// assert_eq!(reconstruct_phrase("Contracts For Oct. 24, 2022"), "Oct. 24 2022");
/// ```
pub fn reconstruct_phrase(title: &str) -> String {
    let mut phrase = String::new();
    for word in title.split_whitespace() {
        if word.chars().count() <= 2 || TITLE_BOILERPLATE.contains(&word) {
            continue;
        }
        if word.chars().count() > 3 && word.chars().all(char::is_numeric) {
            phrase.push_str(word);
        } else {
            phrase.push_str(&word.replace(',', ""));
            phrase.push(' ');
        }
    }
    phrase
}

/// Look up a month by full name or any abbreviation of at least three letters.
fn month_number(word: &str) -> Option<u32> {
    if word.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(word))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Parse a day number, tolerating ordinal suffixes ("24th").
fn day_number(word: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

/// Parse a reconstructed date phrase into a calendar date.
///
/// A phrase without a day resolves to the first of the month.
pub fn parse_phrase(title: &str, phrase: &str) -> Result<NaiveDate> {
    let unparseable = || ExtractError::UnparseableDate {
        title: title.trim().to_string(),
        phrase: phrase.trim().to_string(),
    };

    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;

    for raw in phrase.split_whitespace() {
        let word = raw.trim_end_matches('.').to_lowercase();

        if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) && year.is_none() {
            year = word.parse().ok();
        } else if let Some(d) = day_number(&word).filter(|_| day.is_none()) {
            day = Some(d);
        } else if let Some(m) = month_number(&word).filter(|_| month.is_none()) {
            month = Some(m);
        } else if !WEEKDAYS.contains(&word.as_str()) {
            return Err(unparseable());
        }
    }

    let (Some(year), Some(month)) = (year, month) else {
        return Err(unparseable());
    };

    let day = day.unwrap_or_else(|| {
        tracing::warn!(title = %title.trim(), "Date phrase has no day, using the first of the month");
        1
    });

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ExtractError::InvalidCalendarDate {
        title: title.trim().to_string(),
        year,
        month,
        day,
    })
}

/// Recover the 8-digit `YYYYMMDD` date code from a page title.
///
/// # Errors
/// Fails when the title holds no recognizable date phrase. Callers treat
/// this as fatal for the whole document.
///
/// # Examples
/// ```
/// use dodaward_extractor::date::parse_title;
///
/// assert_eq!(parse_title("Contracts For Oct. 24, 2022").unwrap(), "20221024");
/// assert!(parse_title("Contracts For Today").is_err());
/// ```
pub fn parse_title(title: &str) -> Result<String> {
    let phrase = reconstruct_phrase(title);
    let date = parse_phrase(title, &phrase)?;
    Ok(date.format("%Y%m%d").to_string())
}
