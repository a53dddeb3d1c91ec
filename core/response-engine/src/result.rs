//! FILENAME: core/response-engine/src/result.rs
//! PURPOSE: The tabular query result and its boundary validation.
//! CONTEXT: Everything downstream assumes rectangular rows, so shape errors
//! are rejected here before any derived output is produced.

use serde::{Deserialize, Serialize};

use crate::cell::Row;
use crate::column::Column;
use crate::error::{Result, ResultError};

/// A `{columns, rows}` result returned by the analytics backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Display type suggested by the backend (e.g. "suggestion", "help").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Wire form where both lists may be absent.
#[derive(Deserialize)]
struct RawQueryResult {
    columns: Option<Vec<Column>>,
    rows: Option<Vec<Row>>,
    #[serde(default)]
    display_type: Option<String>,
}

impl QueryResult {
    /// Builds a result, assigning each column its position as `index`.
    pub fn new(mut columns: Vec<Column>, rows: Vec<Row>) -> Self {
        normalize_columns(&mut columns);
        QueryResult {
            columns,
            rows,
            display_type: None,
        }
    }

    pub fn with_display_type(mut self, display_type: impl Into<String>) -> Self {
        self.display_type = Some(display_type.into());
        self
    }

    /// Parses and validates a backend JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawQueryResult = serde_json::from_str(json)?;
        let mut columns = raw.columns.ok_or(ResultError::MissingColumns)?;
        let rows = raw.rows.ok_or(ResultError::MissingRows)?;
        normalize_columns(&mut columns);

        let result = QueryResult {
            columns,
            rows,
            display_type: raw.display_type,
        };
        result.validate()?;
        Ok(result)
    }

    /// Checks that every row has exactly one cell per column.
    pub fn validate(&self) -> Result<()> {
        validate_rows(&self.columns, &self.rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn visible_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_visible).count()
    }

    /// Exactly one row holding exactly one cell.
    pub fn is_single_value(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].len() == 1
    }
}

/// Checks that every row has exactly one cell per column. Functions that
/// take columns and rows separately call this before indexing cells.
pub fn validate_rows(columns: &[Column], rows: &[Row]) -> Result<()> {
    let expected = columns.len();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(ResultError::RowLength {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

/// Checks that `index` names a column of the result.
pub fn check_field(columns: &[Column], index: usize) -> Result<&Column> {
    columns.get(index).ok_or(ResultError::FieldIndex {
        index,
        column_count: columns.len(),
    })
}

/// Fills derived metadata the backend may omit: `index` is the column's
/// position and an empty `display_name` falls back to `name`.
fn normalize_columns(columns: &mut [Column]) {
    for (i, column) in columns.iter_mut().enumerate() {
        column.index = i;
        if column.display_name.is_empty() {
            column.display_name = column.name.clone();
        }
    }
}
