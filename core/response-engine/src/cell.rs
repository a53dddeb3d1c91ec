//! FILENAME: core/response-engine/src/cell.rs
//! PURPOSE: Defines the value held by a single cell of a query response row.
//! CONTEXT: Backends send numeric strings, numbers, ISO-date strings or epoch
//! seconds depending on the column type. `CellValue` keeps the raw shape and
//! offers the lenient numeric coercion the pipeline relies on.

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{Result, ResultError};

/// Raw data within a cell. JSON `null`, numbers and strings map onto the
/// three variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

/// A row is positionally aligned with the result's column list.
pub type Row = Vec<CellValue>;

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Lenient numeric coercion. Unparsable text and empty cells become NaN.
    pub fn as_number(&self) -> f64 {
        self.try_number().unwrap_or(f64::NAN)
    }

    /// Numeric value of the cell, or None if it cannot be parsed.
    pub fn try_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }

    /// Returns the unformatted display string of the cell.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => number_to_string(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Plain number rendering: integers without a decimal point, other values
/// with trailing zeros trimmed.
pub(crate) fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Coerces a cell of a number column.
///
/// In lenient mode unparsable values become NaN. In strict mode they raise
/// `ResultError::Coercion` carrying the row and column that failed.
pub fn coerce_number(value: &CellValue, strict: bool, row: usize, column: &Column) -> Result<f64> {
    match value.try_number() {
        Some(n) => Ok(n),
        None if strict => Err(ResultError::Coercion {
            row,
            column: column.name.clone(),
            value: value.display_value(),
        }),
        None => Ok(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn test_deserialize_mixed_cells() {
        let row: Row = serde_json::from_str(r#"[null, 12.5, "West", "100"]"#).unwrap();
        assert_eq!(row[0], CellValue::Empty);
        assert_eq!(row[1], CellValue::Number(12.5));
        assert_eq!(row[2], CellValue::text("West"));
        assert_eq!(row[3], CellValue::text("100"));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::text(" 42 ").as_number(), 42.0);
        assert_eq!(CellValue::from(3.5).as_number(), 3.5);
        assert!(CellValue::text("abc").as_number().is_nan());
        assert!(CellValue::Empty.as_number().is_nan());
        assert_eq!(CellValue::text("abc").try_number(), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(CellValue::from(42.0).display_value(), "42");
        assert_eq!(CellValue::from(0.25).display_value(), "0.25");
        assert_eq!(CellValue::Empty.display_value(), "");
        assert_eq!(CellValue::from(None::<f64>), CellValue::Empty);
    }

    #[test]
    fn test_strict_coercion_reports_location() {
        let column = Column::new("sales", ColumnType::DollarAmt);
        let lenient = coerce_number(&CellValue::text("n/a"), false, 3, &column).unwrap();
        assert!(lenient.is_nan());

        let err = coerce_number(&CellValue::text("n/a"), true, 3, &column).unwrap_err();
        match err {
            ResultError::Coercion { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "sales");
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected coercion error, got {:?}", other),
        }
    }
}
