//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - the rectangular matrix handed to renderers.
//!
//! The first column is the frozen row-key column. Cells without a source
//! row hold an empty string, never a numeric zero.

use serde::{Deserialize, Serialize};
use response_engine::{CellValue, Column, Row};

/// Title of the frozen first column of a date pivot.
pub const MONTH_COLUMN_NAME: &str = "Month";

/// Filler for matrix cells that no source row populated.
pub fn blank_cell() -> CellValue {
    CellValue::Text(String::new())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotMatrix {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl PivotMatrix {
    /// Creates a matrix of `row_count` rows pre-filled with blank cells.
    pub(crate) fn blank(columns: Vec<Column>, row_count: usize) -> Self {
        let width = columns.len();
        PivotMatrix {
            rows: vec![vec![blank_cell(); width]; row_count],
            columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.len() < 2
    }

    /// Number of value cells (excluding the frozen column) holding data.
    pub fn populated_cell_count(&self) -> usize {
        let blank = blank_cell();
        self.rows
            .iter()
            .map(|row| row.iter().skip(1).filter(|cell| **cell != blank).count())
            .sum()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
