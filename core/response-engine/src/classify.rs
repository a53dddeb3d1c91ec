//! FILENAME: core/response-engine/src/classify.rs
//! PURPOSE: Column classification helpers.
//! CONTEXT: Pure predicates over column metadata. Every other stage of the
//! pipeline branches on these answers.

use crate::column::{Column, ColumnType};

/// Coarse classification of a column. Unknown types are `Unclassified`
/// and must be handled explicitly by callers rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Number,
    String,
    Unclassified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnTypeCounts {
    pub number_count: usize,
    pub string_count: usize,
}

pub fn is_number_type(column: &Column) -> bool {
    matches!(
        column.column_type,
        ColumnType::DollarAmt | ColumnType::Quantity | ColumnType::Percent | ColumnType::Ratio
    )
}

pub fn is_string_type(column: &Column) -> bool {
    matches!(
        column.column_type,
        ColumnType::String | ColumnType::DateString | ColumnType::Date
    )
}

pub fn is_date_type(column: &Column) -> bool {
    matches!(column.column_type, ColumnType::Date | ColumnType::DateString)
}

pub fn classify(column: &Column) -> ColumnClass {
    if is_number_type(column) {
        ColumnClass::Number
    } else if is_string_type(column) {
        ColumnClass::String
    } else {
        ColumnClass::Unclassified
    }
}

pub fn count_column_types(columns: &[Column]) -> ColumnTypeCounts {
    columns
        .iter()
        .fold(ColumnTypeCounts::default(), |mut counts, column| {
            match classify(column) {
                ColumnClass::Number => counts.number_count += 1,
                ColumnClass::String => counts.string_count += 1,
                ColumnClass::Unclassified => {}
            }
            counts
        })
}

/// Indices of groupable columns, in column order.
pub fn groupable_indices(columns: &[Column]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.groupable)
        .map(|(i, _)| i)
        .collect()
}

pub fn visible_column_indices(columns: &[Column]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_visible)
        .map(|(i, _)| i)
        .collect()
}

/// First DATE or DATE_STRING column.
pub fn date_column_index(columns: &[Column]) -> Option<usize> {
    columns.iter().position(is_date_type)
}

pub fn multi_series_index(columns: &[Column]) -> Option<usize> {
    columns.iter().position(|c| c.multi_series)
}
