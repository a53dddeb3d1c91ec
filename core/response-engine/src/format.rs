//! FILENAME: core/response-engine/src/format.rs
//! PURPOSE: Cell formatting by column type.
//! CONTEXT: Formatted values double as grouping labels (aggregation), pivot
//! column titles and chart tooltips, so the same function serves all three.

use chrono::Datelike;

use crate::cell::{number_to_string, CellValue};
use crate::column::{Column, ColumnType};
use crate::date::{parse_date, MONTH_NAMES};

/// Formats a cell for display according to its column type.
/// Values that do not parse for a numeric or date type pass through raw.
pub fn format_element(value: &CellValue, column: &Column) -> String {
    if value.is_empty() {
        return String::new();
    }

    match column.column_type {
        ColumnType::DollarAmt => match value.try_number() {
            Some(n) => format_currency(n),
            None => value.display_value(),
        },
        ColumnType::Quantity => match value.try_number() {
            Some(n) => format_quantity(n),
            None => value.display_value(),
        },
        ColumnType::Percent => match value.try_number() {
            Some(n) => format_percentage(n),
            None => value.display_value(),
        },
        ColumnType::Ratio => match value.try_number() {
            Some(n) => format!("{:.4}", n),
            None => value.display_value(),
        },
        ColumnType::Date => match parse_date(value) {
            Some(dt) => format!(
                "{} {}, {}",
                MONTH_NAMES[dt.month0() as usize],
                dt.day(),
                dt.year()
            ),
            None => value.display_value(),
        },
        ColumnType::String | ColumnType::DateString | ColumnType::Unknown(_) => {
            value.display_value()
        }
    }
}

/// Label used to decide whether two rows belong to the same group.
/// Empty cells have no label and never group with anything.
pub fn format_label(value: &CellValue, column: &Column) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(format_element(value, column))
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let mut parts = s.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let decimal_part = parts.next();

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result.insert(0, '-');
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

fn format_currency(value: f64) -> String {
    let formatted = add_thousands_separator(&format!("{:.2}", value.abs()));
    if value < 0.0 {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        add_thousands_separator(&number_to_string(value))
    } else {
        add_thousands_separator(&format!("{:.2}", value))
    }
}

fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
