//! FILENAME: core/response-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResultError {
    #[error("Malformed result: columns are missing")]
    MissingColumns,

    #[error("Malformed result: rows are missing")]
    MissingRows,

    #[error("Malformed result: row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed result: field {index} is out of range for {column_count} columns")]
    FieldIndex { index: usize, column_count: usize },

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Non-numeric value {value:?} in column '{column}' at row {row}")]
    Coercion {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unparsable date {value:?} in column '{column}' at row {row}")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Duplicate pivot cell ({row_key}, {column_key}) at row {row}")]
    PivotCollision {
        row: usize,
        row_key: String,
        column_key: String,
    },
}

impl ResultError {
    /// True for errors describing a structurally broken result.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ResultError::MissingColumns
                | ResultError::MissingRows
                | ResultError::RowLength { .. }
                | ResultError::FieldIndex { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ResultError>;
