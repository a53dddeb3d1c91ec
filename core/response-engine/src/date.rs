//! FILENAME: core/response-engine/src/date.rs
//! PURPOSE: Date parsing for DATE and DATE_STRING cells.
//! CONTEXT: DATE cells arrive as epoch seconds (number or numeric string),
//! DATE_STRING cells as ISO strings of varying precision ("2020",
//! "2020-03", "2020-03-15", RFC 3339). All values are interpreted in UTC.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::cell::CellValue;

/// Calendar month names, January first. Row order of the date pivot.
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

fn from_epoch_seconds(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.trunc() as i64, 0).map(|dt| dt.naive_utc())
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    // A bare four digit value is a year, not an epoch offset.
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    }

    if let Ok(seconds) = s.parse::<f64>() {
        return from_epoch_seconds(seconds);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    // "2020-03" month precision
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a DATE / DATE_STRING cell. Returns None for empty or unparsable
/// values.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(n) => from_epoch_seconds(*n),
        CellValue::Text(s) => parse_date_text(s),
    }
}

pub fn year_of(value: &CellValue) -> Option<i32> {
    parse_date(value).map(|dt| dt.year())
}

/// Zero-based calendar month (January = 0).
pub fn month_index(value: &CellValue) -> Option<usize> {
    parse_date(value).map(|dt| dt.month0() as usize)
}

/// Chronological ordering of two date cells. Unparsable values sort after
/// every parsable one and compare by their raw text among themselves.
pub fn compare_dates(a: &CellValue, b: &CellValue) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.display_value().cmp(&b.display_value()),
    }
}
