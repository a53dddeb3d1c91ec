//! FILENAME: core/display-engine/src/lib.rs
//! Display subsystem for query responses.
//!
//! Decides which visualizations a result supports and prepares the data
//! each of them renders. It depends on `pivot-engine` for aggregation and
//! pivot matrices, and on `response-engine` for shared types.
//!
//! Layers:
//! - `display_type`: Visualization identifiers
//! - `capabilities`: Supported types and the default choice (WHAT can render)
//! - `decorate`: Renderer-facing column copies
//! - `series`: Chart point data
//! - `pipeline`: The `transform` entry point (HOW a result becomes output)

pub mod capabilities;
pub mod decorate;
pub mod display_type;
pub mod pipeline;
pub mod series;

pub use capabilities::{
    default_display_type, supported_display_types, CapabilityPolicy, RowCounts, MAX_PIVOT_ROWS,
    PIE_MAX_ROWS, PIE_MIN_ROWS_EXCLUSIVE,
};
pub use decorate::{decorate_columns, decorate_pivot_columns, DisplayColumn, HeaderFilter};
pub use display_type::DisplayType;
pub use pipeline::{prepare_chart_rows, transform, PipelineOptions, PipelineOutput};
pub use series::{
    build_chart_series, build_flat_series, build_labeled_series, ChartSeries, Formatter,
    LabeledPoint, SeriesPoint,
};

/// Errors surfaced by `transform`.
pub use response_engine::ResultError as PipelineError;
