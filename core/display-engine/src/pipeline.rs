//! FILENAME: core/display-engine/src/pipeline.rs
//! Response Pipeline - one pass from a raw result to renderable output.
//!
//! Steps: validate, resolve capabilities, pick the display type, decorate
//! the table columns, then prepare chart rows or build the pivot matrix for
//! whichever view is active. Every call recomputes from scratch; nothing
//! outlives the returned `PipelineOutput`.

use serde::{Deserialize, Serialize};
use response_engine::{
    groupable_indices, log_debug, log_info, Column, QueryResult, Result, Row,
};
use pivot_engine::{
    aggregate_rows, build_pivot, sort_rows_by_label, AggregateOptions, PivotKind, PivotOptions,
};

use crate::capabilities::{
    default_display_type, supported_display_types, CapabilityPolicy, RowCounts,
};
use crate::decorate::{decorate_columns, decorate_pivot_columns, DisplayColumn};
use crate::display_type::DisplayType;
use crate::series::{build_chart_series, ChartSeries};

// ============================================================================
// OPTIONS
// ============================================================================

/// Caller configuration for one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Requested (or previously shown) display type. Ignored when the
    /// result does not support it.
    pub requested_display_type: Option<DisplayType>,

    /// Default to the first chart type for aggregation results.
    pub prefer_chart: bool,

    /// Row count computed by the caller before any filtering.
    pub prior_row_count: Option<usize>,

    pub prior_pivot_row_count: Option<usize>,

    /// Raise on coercion failures, pivot collisions and unparsable pivot
    /// dates instead of tolerating them.
    pub strict: bool,

    /// Warn when aggregation input is not grouped by label.
    pub check_sort_order: bool,

    /// Rows already arrive sorted by the label column; skip sorting.
    pub assume_sorted: bool,

    pub policy: CapabilityPolicy,
}

impl PipelineOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            strict: self.strict,
            check_sort_order: self.check_sort_order,
        }
    }

    fn pivot_options(&self) -> PivotOptions {
        PivotOptions { strict: self.strict }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub supported_display_types: Vec<DisplayType>,
    pub display_type: DisplayType,
    pub table_columns: Vec<DisplayColumn>,
    /// Absent for backend-dictated text views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_table_columns: Option<Vec<DisplayColumn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_table_data: Option<Vec<Row>>,
    /// Sorted and aggregated rows feeding the chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_rows: Option<Vec<Row>>,
    #[serde(skip)]
    source_columns: Vec<Column>,
}

impl PipelineOutput {
    /// Chart points over `chart_rows`, borrowing from this output.
    pub fn chart_series(&self) -> Option<ChartSeries<'_>> {
        let rows = self.chart_rows.as_ref()?;
        build_chart_series(&self.source_columns, rows)
    }

    pub fn source_columns(&self) -> &[Column] {
        &self.source_columns
    }
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Runs the pipeline over a result. Malformed results are rejected before
/// any output is produced.
pub fn transform(result: &QueryResult, options: &PipelineOptions) -> Result<PipelineOutput> {
    result.validate()?;

    let counts = RowCounts::resolve(result, options.prior_row_count, options.prior_pivot_row_count);
    let supported = supported_display_types(result, &counts, &options.policy);
    let display_type = default_display_type(
        result,
        &supported,
        options.requested_display_type,
        options.prefer_chart,
    );

    log_info!(
        "DISPLAY",
        "resolved {} (supported: {}) for {} rows x {} columns",
        display_type,
        supported.iter().map(DisplayType::as_str).collect::<Vec<_>>().join(","),
        result.row_count(),
        result.column_count()
    );

    let table_data = if display_type.is_passthrough() {
        None
    } else {
        Some(result.rows.clone())
    };

    let mut output = PipelineOutput {
        supported_display_types: supported,
        display_type,
        table_columns: decorate_columns(&result.columns),
        table_data,
        pivot_table_columns: None,
        pivot_table_data: None,
        chart_rows: None,
        source_columns: result.columns.clone(),
    };

    if display_type == DisplayType::PivotTable {
        if let Some(kind) = PivotKind::detect(&result.columns) {
            let matrix = build_pivot(&result.columns, &result.rows, kind, &options.pivot_options())?;
            output.pivot_table_columns = Some(decorate_pivot_columns(&matrix.columns));
            output.pivot_table_data = Some(matrix.rows);
        }
    }

    if display_type.is_chart() {
        output.chart_rows = Some(prepare_chart_rows(&result.columns, &result.rows, options)?);
    }

    Ok(output)
}

/// Sorts rows by the first groupable key and collapses equal labels. The
/// two-key pivot shape keeps one row per cell, so it is only sorted.
pub fn prepare_chart_rows(
    columns: &[Column],
    rows: &[Row],
    options: &PipelineOptions,
) -> Result<Vec<Row>> {
    let Some(&label_index) = groupable_indices(columns).first() else {
        return Ok(rows.to_vec());
    };

    let mut sorted = rows.to_vec();
    if !options.assume_sorted {
        sort_rows_by_label(columns, &mut sorted, label_index);
    }

    if PivotKind::generic(columns).is_some() {
        log_debug!("DISPLAY", "pivot shape: chart rows bypass aggregation");
        return Ok(sorted);
    }

    aggregate_rows(columns, &sorted, label_index, &options.aggregate_options())
}
