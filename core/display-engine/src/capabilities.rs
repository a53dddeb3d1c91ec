//! FILENAME: core/display-engine/src/capabilities.rs
//! Capability Resolver - which display types a result supports.
//!
//! The supported list is ordered; its first entry is the fallback default.
//! Thresholds are policy, not derived from data, and are exposed through
//! `CapabilityPolicy`. Exceeding one silently narrows the list (e.g. to
//! `table` only); it is never an error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use response_engine::{
    count_column_types, groupable_indices, is_date_type, year_of, ColumnType, QueryResult,
};
use pivot_engine::{unique_values, PivotKind};

use crate::display_type::DisplayType;

/// Largest row count for which pivot and multi-series charts are offered.
pub const MAX_PIVOT_ROWS: usize = 1000;

/// Pie charts need strictly more rows than this.
pub const PIE_MIN_ROWS_EXCLUSIVE: usize = 1;

/// Pie charts allow at most this many rows.
pub const PIE_MAX_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityPolicy {
    pub max_pivot_rows: usize,
    pub pie_min_rows_exclusive: usize,
    pub pie_max_rows: usize,
}

impl Default for CapabilityPolicy {
    fn default() -> Self {
        CapabilityPolicy {
            max_pivot_rows: MAX_PIVOT_ROWS,
            pie_min_rows_exclusive: PIE_MIN_ROWS_EXCLUSIVE,
            pie_max_rows: PIE_MAX_ROWS,
        }
    }
}

impl CapabilityPolicy {
    pub fn allows_pie(&self, row_count: usize) -> bool {
        row_count > self.pie_min_rows_exclusive && row_count <= self.pie_max_rows
    }
}

/// Row counts the resolver works from. Callers that filtered rows before
/// resolution pass their counts in; otherwise they are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub rows: usize,
    /// Row count of the pivot matrix this result would produce.
    pub pivot_rows: usize,
}

impl RowCounts {
    pub fn resolve(
        result: &QueryResult,
        prior_rows: Option<usize>,
        prior_pivot_rows: Option<usize>,
    ) -> Self {
        let rows = prior_rows.unwrap_or(result.rows.len());
        let pivot_rows = prior_pivot_rows.unwrap_or_else(|| derived_pivot_rows(result));
        RowCounts { rows, pivot_rows }
    }
}

fn derived_pivot_rows(result: &QueryResult) -> usize {
    match PivotKind::detect(&result.columns) {
        Some(PivotKind::Generic { row_key, .. }) => {
            unique_values(&result.rows, row_key, &result.columns[row_key]).len()
        }
        Some(PivotKind::Date { .. }) if !result.rows.is_empty() => 12,
        _ => 0,
    }
}

// ============================================================================
// SUPPORTED TYPES
// ============================================================================

fn passthrough_type(result: &QueryResult) -> Option<DisplayType> {
    result
        .display_type
        .as_deref()
        .and_then(|s| s.parse::<DisplayType>().ok())
        .filter(DisplayType::is_passthrough)
}

/// Two groupable keys in exactly three columns.
fn is_regular_pivot(result: &QueryResult) -> bool {
    PivotKind::generic(&result.columns).is_some()
}

/// A DATE column titled like a month, alone with one other column, with
/// data spanning more than one year.
fn supports_date_pivot(result: &QueryResult) -> bool {
    if result.columns.len() != 2 {
        return false;
    }
    let Some(date_index) = result.columns.iter().position(|c| {
        c.column_type == ColumnType::Date && c.title().to_lowercase().contains("month")
    }) else {
        return false;
    };

    let years: BTreeSet<String> = result
        .rows
        .iter()
        .filter_map(|row| year_of(&row[date_index]))
        .map(|year| year.to_string())
        .collect();
    years.len() > 1
}

/// Computes the ordered list of display types the result supports.
pub fn supported_display_types(
    result: &QueryResult,
    counts: &RowCounts,
    policy: &CapabilityPolicy,
) -> Vec<DisplayType> {
    if let Some(passthrough) = passthrough_type(result) {
        return vec![passthrough];
    }

    if result.visible_column_count() == 0 || result.rows.is_empty() {
        return vec![DisplayType::Text];
    }

    if result.is_single_value() {
        return vec![DisplayType::SingleValue];
    }

    let groupables = groupable_indices(&result.columns);

    if groupables.len() == 2 && is_regular_pivot(result) {
        let mut types = vec![DisplayType::Table];
        if counts.rows <= policy.max_pivot_rows && counts.pivot_rows > 0 {
            let has_date_key = groupables.iter().any(|&i| is_date_type(&result.columns[i]));
            types.extend([
                DisplayType::PivotTable,
                DisplayType::StackedColumn,
                DisplayType::StackedBar,
            ]);
            if has_date_key {
                types.push(DisplayType::StackedLine);
            }
            types.extend([
                DisplayType::Column,
                DisplayType::Bar,
                DisplayType::Bubble,
                DisplayType::Heatmap,
            ]);
        }
        return types;
    }

    if groupables.len() == 1 && count_column_types(&result.columns).number_count >= 1 {
        let mut types = vec![
            DisplayType::Table,
            DisplayType::Column,
            DisplayType::Bar,
            DisplayType::Line,
        ];
        if policy.allows_pie(counts.rows) {
            types.push(DisplayType::Pie);
        }
        if supports_date_pivot(result) {
            types.push(DisplayType::PivotTable);
        }
        return types;
    }

    vec![DisplayType::Table]
}

// ============================================================================
// DEFAULT SELECTION
// ============================================================================

/// Swaps in the first chart type when the caller prefers charts and the
/// result is an aggregation.
fn chart_preferred(
    fallback: DisplayType,
    supported: &[DisplayType],
    prefer_chart: bool,
    is_aggregation: bool,
) -> DisplayType {
    if prefer_chart && is_aggregation {
        if let Some(chart) = supported.iter().copied().find(DisplayType::is_chart) {
            return chart;
        }
    }
    fallback
}

/// Picks the display type to show. Unsupported requests resolve silently
/// to the computed default.
pub fn default_display_type(
    result: &QueryResult,
    supported: &[DisplayType],
    requested: Option<DisplayType>,
    prefer_chart: bool,
) -> DisplayType {
    if let Some(requested) = requested {
        if supported.contains(&requested) {
            return requested;
        }
    }

    if let Some(passthrough) = passthrough_type(result) {
        return passthrough;
    }

    if supported.len() == 1 {
        return supported[0];
    }

    let is_aggregation = !groupable_indices(&result.columns).is_empty();

    if supported.contains(&DisplayType::PivotTable) {
        return chart_preferred(DisplayType::PivotTable, supported, prefer_chart, is_aggregation);
    }

    if supported.contains(&DisplayType::Table) {
        return chart_preferred(DisplayType::Table, supported, prefer_chart, is_aggregation);
    }

    DisplayType::Text
}
