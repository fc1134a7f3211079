//! Lenient parsing of distance and clock-time cells.
//!
//! Nothing in here fails: a value that does not parse comes back as `None`
//! and the caller treats it as "does not satisfy the filter" or "no time".

use super::table::Cell;
use crate::utils::config::{DATETIME_FORMATS, DATE_FORMATS, TIME_FORMATS};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a distance cell as a number
///
/// Numbers pass through; text is trimmed and parsed as `f64`.
/// Blank, boolean and date-time cells are unparseable.
pub fn parse_distance(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse a clock-time cell as a full date-time
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_timestamp_text(s),
        _ => None,
    }
}

/// Parse timestamp text against the accepted layouts
///
/// Date-only text reads as midnight. Time-only text is anchored on the
/// spreadsheet epoch day (1899-12-30) so it still orders correctly
/// against other time-only values.
pub fn parse_timestamp_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return date.and_hms_opt(0, 0, 0);
    }

    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())?;
    NaiveDate::from_ymd_opt(1899, 12, 30).map(|day| day.and_time(time))
}
