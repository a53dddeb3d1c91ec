//! FILENAME: core/display-engine/src/decorate.rs
//! Presentation decoration - renderer-facing copies of the column list.
//!
//! Canonical columns are never mutated; every presentation field lives on
//! a `DisplayColumn` that wraps a clone.

use serde::{Deserialize, Serialize};
use response_engine::{classify, is_date_type, Column, ColumnClass};

// ============================================================================
// HEADER FILTERS
// ============================================================================

/// Kind of header filter a renderer should offer for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderFilter {
    Text,
    Number,
    Date,
}

impl HeaderFilter {
    pub fn for_column(column: &Column) -> Self {
        if is_date_type(column) {
            return HeaderFilter::Date;
        }
        match classify(column) {
            ColumnClass::Number => HeaderFilter::Number,
            ColumnClass::String | ColumnClass::Unclassified => HeaderFilter::Text,
        }
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        HeaderFilter::Text
    }
}

// ============================================================================
// DISPLAY COLUMN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayColumn {
    #[serde(flatten)]
    pub column: Column,
    /// Row accessor key; the column's position as a string.
    pub field: String,
    pub title: String,
    pub header_filter: HeaderFilter,
    /// Pinned while scrolling horizontally.
    #[serde(default)]
    pub frozen: bool,
}

impl DisplayColumn {
    pub fn new(column: &Column, position: usize) -> Self {
        DisplayColumn {
            field: position.to_string(),
            title: column.title().to_string(),
            header_filter: HeaderFilter::for_column(column),
            frozen: false,
            column: column.clone(),
        }
    }

    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }
}

/// Decorates the table columns. Hidden columns keep their slot so `field`
/// stays aligned with the row cells.
pub fn decorate_columns(columns: &[Column]) -> Vec<DisplayColumn> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| DisplayColumn::new(column, i))
        .collect()
}

/// Decorates pivot matrix columns; the first one is the frozen key column.
pub fn decorate_pivot_columns(columns: &[Column]) -> Vec<DisplayColumn> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let decorated = DisplayColumn::new(column, i);
            if i == 0 {
                decorated.frozen()
            } else {
                decorated
            }
        })
        .collect()
}
