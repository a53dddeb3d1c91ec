//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - which reshaping applies to a result.
//!
//! The pivot shape is derived purely from the column list:
//! - two columns, one of them a date key and one a number: date pivot
//! - three columns, two of them groupable: generic two-key pivot

use serde::{Deserialize, Serialize};
use response_engine::{groupable_indices, is_date_type, is_number_type, Column};

/// Index into the source row (0-based).
pub type FieldIndex = usize;

// ============================================================================
// PIVOT SHAPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotKind {
    /// 12-month by N-year matrix.
    Date {
        date_index: FieldIndex,
        value_index: FieldIndex,
    },
    /// Unique row key by unique column key matrix.
    Generic {
        row_key: FieldIndex,
        column_key: FieldIndex,
        value_index: FieldIndex,
    },
}

impl PivotKind {
    /// Detects the pivot shape of a column list, if any.
    pub fn detect(columns: &[Column]) -> Option<PivotKind> {
        match columns.len() {
            2 => {
                let date_index = columns.iter().position(is_date_type)?;
                let value_index = 1 - date_index;
                if is_number_type(&columns[value_index]) {
                    Some(PivotKind::Date {
                        date_index,
                        value_index,
                    })
                } else {
                    None
                }
            }
            3 => PivotKind::generic(columns),
            _ => None,
        }
    }

    /// Generic shape: exactly two groupable keys in three columns. The
    /// first groupable column is the row key, the second the column key.
    pub fn generic(columns: &[Column]) -> Option<PivotKind> {
        if columns.len() != 3 {
            return None;
        }
        match groupable_indices(columns).as_slice() {
            [row_key, column_key] => {
                let value_index = (0..3).find(|i| i != row_key && i != column_key)?;
                Some(PivotKind::Generic {
                    row_key: *row_key,
                    column_key: *column_key,
                    value_index,
                })
            }
            _ => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, PivotKind::Date { .. })
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Controls the aggregation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Raise on non-numeric cells in number columns instead of using NaN.
    #[serde(default)]
    pub strict: bool,

    /// Log a warning when a label reappears after a different label.
    /// Output is unchanged either way.
    #[serde(default)]
    pub check_sort_order: bool,
}

/// Controls the pivot builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotOptions {
    /// Raise on duplicate cells and unparsable dates instead of
    /// overwriting / skipping.
    #[serde(default)]
    pub strict: bool,
}
