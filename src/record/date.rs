use chrono::{Local, NaiveDate};

use crate::core::CapError;

const MONTHS: [&str; 12] = [
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

/// Normalize the site's free-text date into a calendar date, relative to the
/// local current date for the `Today`/`Yesterday` shapes.
///
/// # Errors
/// Returns [`CapError::MalformedDate`] if the text matches none of the three
/// recognized shapes.
pub fn normalize(text: &str) -> Result<NaiveDate, CapError> {
    normalize_from(text, Local::now().date_naive())
}

/// Like [`normalize`], but with an explicit reference day so the relative
/// shapes are deterministic under test.
pub fn normalize_from(text: &str, today: NaiveDate) -> Result<NaiveDate, CapError> {
    if text.contains("Today") {
        return Ok(today);
    }
    if text.contains("Yesterday") {
        return today
            .pred_opt()
            .ok_or_else(|| CapError::MalformedDate(text.to_string()));
    }

    let mut fields = text.split_whitespace();
    let (Some(day), Some(month), Some(year), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(CapError::MalformedDate(text.to_string()));
    };

    let malformed = || CapError::MalformedDate(text.to_string());
    let day: u32 = day.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month0 = month_index(month).ok_or_else(malformed)?;

    NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or_else(malformed)
}

/// Resolve a month name (or an abbreviation of at least three letters) to a
/// 0-based month index.
fn month_index(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|full| full.starts_with(&lower))
        .map(|i| i as u32)
}
