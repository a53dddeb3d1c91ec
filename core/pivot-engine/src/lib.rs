//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot and aggregation subsystem for query responses.
//!
//! This crate reshapes a validated `QueryResult` for charting and pivot
//! display. It depends on `response-engine` only for shared types
//! (CellValue, Column, QueryResult) and formatting.
//!
//! Layers:
//! - `definition`: Pivot shape detection and option structs (what to build)
//! - `accumulator`: Per-column aggregate reduction
//! - `aggregation`: Run-length collapse of label-sorted rows
//! - `view`: The pivot matrix handed to renderers (WHAT we display)
//! - `engine`: Date and generic pivot builders (HOW we reshape)

pub mod accumulator;
pub mod aggregation;
pub mod definition;
pub mod engine;
pub mod view;

pub use accumulator::{AggregateAccumulator, OrderedFloat};
pub use aggregation::{aggregate_rows, compare_labels, sort_rows_by_label};
pub use definition::{AggregateOptions, PivotKind, PivotOptions};
pub use engine::{build_date_pivot, build_generic_pivot, build_pivot, unique_values};
pub use view::{blank_cell, PivotMatrix, MONTH_COLUMN_NAME};
