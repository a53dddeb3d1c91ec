//! FILENAME: core/response-engine/src/lib.rs
//! PURPOSE: Main library entry point for the query response model.
//! CONTEXT: Re-exports the cell/column types, shape validation, the column
//! classifier and cell formatting used by `pivot-engine` and `display-engine`.

#[macro_use]
mod logging;

pub mod cell;
pub mod classify;
pub mod column;
pub mod date;
pub mod error;
pub mod format;
pub mod result;

#[doc(hidden)]
pub use log as __log;

// Re-export commonly used types at the crate root
pub use cell::{coerce_number, CellValue, Row};
pub use classify::{
    classify, count_column_types, date_column_index, groupable_indices, is_date_type,
    is_number_type, is_string_type, multi_series_index, visible_column_indices, ColumnClass,
    ColumnTypeCounts,
};
pub use column::{AggregationType, Column, ColumnType};
pub use date::{compare_dates, month_index, parse_date, year_of, MONTH_NAMES};
pub use error::{Result, ResultError};
pub use format::{format_element, format_label};
pub use result::{check_field, validate_rows, QueryResult};
