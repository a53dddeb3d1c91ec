//! FILENAME: core/pivot-engine/src/aggregation.rs
//! Aggregation Engine - run-length collapse of label-sorted rows.
//!
//! Rows must already be sorted by the label column (`sort_rows_by_label`).
//! The scan only merges ADJACENT rows with equal formatted labels; equal
//! labels separated by another label produce separate output rows. That
//! precondition is the caller's obligation and is not enforced.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use response_engine::{
    check_field, coerce_number, compare_dates, format_label, is_date_type, is_number_type,
    log_debug, log_warn, validate_rows, CellValue, Column, Result, Row,
};

use crate::accumulator::AggregateAccumulator;
use crate::definition::{AggregateOptions, FieldIndex};

// ============================================================================
// SORTING
// ============================================================================

/// Ordering of two raw label values. Date columns compare chronologically;
/// otherwise numbers sort numerically ahead of text, text lexicographically,
/// and empty labels last. Ties fall back to display text, so this is a total
/// order and values with distinct text never compare Equal.
pub fn compare_labels(a: &CellValue, b: &CellValue, column: &Column) -> Ordering {
    let primary = if is_date_type(column) {
        compare_dates(a, b)
    } else {
        match (a, b) {
            (CellValue::Number(na), CellValue::Number(nb)) => na.total_cmp(nb),
            (CellValue::Text(ta), CellValue::Text(tb)) => ta.cmp(tb),
            _ => label_rank(a).cmp(&label_rank(b)),
        }
    };
    primary.then_with(|| a.display_value().cmp(&b.display_value()))
}

fn label_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Number(_) => 0,
        CellValue::Text(_) => 1,
        CellValue::Empty => 2,
    }
}

/// Stable sort of rows by the label column, date-aware for date columns.
/// Rows missing the label cell sort as empty labels.
pub fn sort_rows_by_label(columns: &[Column], rows: &mut [Row], label_index: FieldIndex) {
    let Some(column) = columns.get(label_index) else {
        return;
    };
    let empty = CellValue::Empty;
    rows.sort_by(|a, b| {
        compare_labels(
            a.get(label_index).unwrap_or(&empty),
            b.get(label_index).unwrap_or(&empty),
            column,
        )
    });
}

/// Index of the first row whose label already closed an earlier run, i.e.
/// the first sign that `rows` is not grouped by label. Empty labels never
/// count.
pub fn first_unsorted_row(rows: &[Row], label_index: FieldIndex, column: &Column) -> Option<usize> {
    let mut finished: FxHashSet<String> = FxHashSet::default();
    let mut current: Option<String> = None;

    for (row_idx, row) in rows.iter().enumerate() {
        let label = row.get(label_index).and_then(|cell| format_label(cell, column));
        if label == current {
            continue;
        }
        if let Some(done) = current.take() {
            finished.insert(done);
        }
        if let Some(next) = &label {
            if finished.contains(next) {
                return Some(row_idx);
            }
        }
        current = label;
    }
    None
}

// ============================================================================
// RUN-LENGTH AGGREGATION
// ============================================================================

/// One pending label group.
struct LabelGroup<'a> {
    label: Option<String>,
    first_row: &'a Row,
    accumulators: Vec<AggregateAccumulator>,
}

impl<'a> LabelGroup<'a> {
    fn start(label: Option<String>, first_row: &'a Row, value_count: usize) -> Self {
        LabelGroup {
            label,
            first_row,
            accumulators: vec![AggregateAccumulator::new(); value_count],
        }
    }

    fn continues(&self, label: &Option<String>) -> bool {
        match (&self.label, label) {
            (Some(current), Some(next)) => current == next,
            _ => false,
        }
    }

    /// Emits the collapsed row: aggregated number columns, everything else
    /// taken from the first row of the group.
    fn finish(self, columns: &[Column], value_indices: &[FieldIndex]) -> Row {
        let mut row = self.first_row.clone();
        for (acc, &col_idx) in self.accumulators.iter().zip(value_indices) {
            row[col_idx] = match acc.compute(columns[col_idx].aggregation()) {
                Some(value) => CellValue::Number(value),
                None => CellValue::Empty,
            };
        }
        row
    }
}

/// Collapses consecutive rows sharing a formatted label into one row per
/// label, applying each visible number column's aggregate (`sum` unless
/// the column carries an override). Ragged rows or an out-of-range label
/// index are rejected as malformed.
pub fn aggregate_rows(
    columns: &[Column],
    rows: &[Row],
    label_index: FieldIndex,
    options: &AggregateOptions,
) -> Result<Vec<Row>> {
    let label_column = check_field(columns, label_index)?;
    validate_rows(columns, rows)?;

    if options.check_sort_order {
        if let Some(row_idx) = first_unsorted_row(rows, label_index, label_column) {
            log_warn!(
                "AGG",
                "label '{}' reappears at row {} after other labels; input is not sorted by column '{}'",
                rows[row_idx][label_index].display_value(),
                row_idx,
                label_column.name
            );
        }
    }

    let value_indices: Vec<FieldIndex> = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != label_index && c.is_visible && is_number_type(c))
        .map(|(i, _)| i)
        .collect();

    let mut output: Vec<Row> = Vec::new();
    let mut pending: Option<LabelGroup> = None;

    for (row_idx, row) in rows.iter().enumerate() {
        let label = format_label(&row[label_index], label_column);

        let continues = pending.as_ref().is_some_and(|g| g.continues(&label));
        if !continues {
            if let Some(group) = pending.take() {
                output.push(group.finish(columns, &value_indices));
            }
            pending = Some(LabelGroup::start(label, row, value_indices.len()));
        }

        if let Some(group) = pending.as_mut() {
            for (acc, &col_idx) in group.accumulators.iter_mut().zip(&value_indices) {
                let value = coerce_number(&row[col_idx], options.strict, row_idx, &columns[col_idx])?;
                acc.add(value);
            }
        }
    }

    if let Some(group) = pending.take() {
        output.push(group.finish(columns, &value_indices));
    }

    log_debug!(
        "AGG",
        "aggregated {} rows into {} on column '{}'",
        rows.len(),
        output.len(),
        label_column.name
    );

    Ok(output)
}
