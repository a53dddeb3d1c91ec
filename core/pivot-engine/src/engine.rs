//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - builds the pivot matrix for a result.
//!
//! Two mutually exclusive layouts, chosen by `PivotKind`:
//! - Date pivot: 12 fixed month rows (January first) by one column per
//!   distinct year, ascending.
//! - Generic pivot: one row per distinct row-key value by one column per
//!   distinct column-key value, both sorted.
//!
//! Duplicate cells are last-write-wins unless `PivotOptions::strict` is set.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use response_engine::{
    check_field, format_element, log_debug, month_index, validate_rows, year_of, CellValue,
    Column, ColumnType, Result, ResultError, Row, MONTH_NAMES,
};

use crate::aggregation::compare_labels;
use crate::definition::{FieldIndex, PivotKind, PivotOptions};
use crate::view::{PivotMatrix, MONTH_COLUMN_NAME};

// ============================================================================
// HELPERS
// ============================================================================

/// Distinct values of one column, sorted the way labels are sorted.
/// Values are distinct by their raw display text; the first occurrence of
/// each text is kept. Rows without the cell are ignored.
pub fn unique_values(rows: &[Row], index: FieldIndex, column: &Column) -> Vec<CellValue> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut values: Vec<CellValue> = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter(|value| seen.insert(value.display_value()))
        .cloned()
        .collect();
    values.sort_by(|a, b| compare_labels(a, b, column));
    values
}

/// Maps each distinct value's display text to its position.
fn index_map(values: &[CellValue]) -> FxHashMap<String, usize> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (value.display_value(), i))
        .collect()
}

/// A value column re-titled for one pivot column.
fn value_column(template: &Column, name: String, title: String, index: usize) -> Column {
    let mut column = template.clone();
    column.name = name;
    column.display_name = title;
    column.index = index;
    column.groupable = false;
    column.multi_series = false;
    column.is_visible = true;
    column
}

/// Tracks written cells so collisions can be reported in strict mode.
struct CellWrites {
    written: Vec<bool>,
    width: usize,
}

impl CellWrites {
    fn new(rows: usize, width: usize) -> Self {
        CellWrites {
            written: vec![false; rows * width],
            width,
        }
    }

    /// Marks a cell written; returns true if it already was.
    fn mark(&mut self, row: usize, col: usize) -> bool {
        let slot = &mut self.written[row * self.width + col];
        std::mem::replace(slot, true)
    }
}

// ============================================================================
// DATE PIVOT
// ============================================================================

/// Builds the month-by-year matrix for a (date, value) result.
pub fn build_date_pivot(
    columns: &[Column],
    rows: &[Row],
    date_index: FieldIndex,
    value_index: FieldIndex,
    options: &PivotOptions,
) -> Result<PivotMatrix> {
    let date_column = check_field(columns, date_index)?;
    let template = check_field(columns, value_index)?;
    validate_rows(columns, rows)?;

    // Resolve every row's (month, year) once.
    let mut placements: Vec<(usize, usize, i32)> = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let cell = &row[date_index];
        match (month_index(cell), year_of(cell)) {
            (Some(month), Some(year)) => placements.push((row_idx, month, year)),
            _ if options.strict => {
                return Err(ResultError::InvalidDate {
                    row: row_idx,
                    column: date_column.name.clone(),
                    value: cell.display_value(),
                });
            }
            _ => log_debug!("PIVOT", "skipping row {} with unparsable date {:?}", row_idx, cell),
        }
    }

    let years: Vec<i32> = placements
        .iter()
        .map(|&(_, _, year)| year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let year_positions: FxHashMap<i32, usize> =
        years.iter().enumerate().map(|(i, &y)| (y, i + 1)).collect();

    let mut pivot_columns = Vec::with_capacity(years.len() + 1);
    pivot_columns.push(Column::new(MONTH_COLUMN_NAME, ColumnType::String));
    for (i, year) in years.iter().enumerate() {
        pivot_columns.push(value_column(template, year.to_string(), year.to_string(), i + 1));
    }

    let mut matrix = PivotMatrix::blank(pivot_columns, MONTH_NAMES.len());
    for (month, name) in MONTH_NAMES.iter().enumerate() {
        matrix.rows[month][0] = CellValue::text(*name);
    }

    let mut writes = CellWrites::new(MONTH_NAMES.len(), matrix.col_count());
    for (row_idx, month, year) in placements {
        let col = year_positions[&year];
        if writes.mark(month, col) && options.strict {
            return Err(ResultError::PivotCollision {
                row: row_idx,
                row_key: MONTH_NAMES[month].to_string(),
                column_key: year.to_string(),
            });
        }
        matrix.rows[month][col] = rows[row_idx][value_index].clone();
    }

    log_debug!(
        "PIVOT",
        "date pivot: {} rows -> 12 months x {} years",
        rows.len(),
        years.len()
    );

    Ok(matrix)
}

// ============================================================================
// GENERIC PIVOT
// ============================================================================

/// Builds the row-key by column-key matrix for a (key1, key2, value) result.
pub fn build_generic_pivot(
    columns: &[Column],
    rows: &[Row],
    row_key: FieldIndex,
    column_key: FieldIndex,
    value_index: FieldIndex,
    options: &PivotOptions,
) -> Result<PivotMatrix> {
    let row_key_column = check_field(columns, row_key)?;
    let column_key_column = check_field(columns, column_key)?;
    let template = check_field(columns, value_index)?;
    validate_rows(columns, rows)?;

    let row_values = unique_values(rows, row_key, row_key_column);
    let column_values = unique_values(rows, column_key, column_key_column);
    let row_positions = index_map(&row_values);
    let column_positions = index_map(&column_values);

    let mut pivot_columns = Vec::with_capacity(column_values.len() + 1);
    let mut frozen = row_key_column.clone();
    frozen.index = 0;
    pivot_columns.push(frozen);
    for (i, value) in column_values.iter().enumerate() {
        pivot_columns.push(value_column(
            template,
            value.display_value(),
            format_element(value, column_key_column),
            i + 1,
        ));
    }

    let mut matrix = PivotMatrix::blank(pivot_columns, row_values.len());
    for (i, value) in row_values.into_iter().enumerate() {
        matrix.rows[i][0] = value;
    }

    let mut writes = CellWrites::new(matrix.row_count(), matrix.col_count());
    for (row_idx, row) in rows.iter().enumerate() {
        let row_text = row[row_key].display_value();
        let column_text = row[column_key].display_value();
        let (Some(&r), Some(&c)) = (row_positions.get(&row_text), column_positions.get(&column_text))
        else {
            continue;
        };
        let c = c + 1;
        if writes.mark(r, c) && options.strict {
            return Err(ResultError::PivotCollision {
                row: row_idx,
                row_key: row_text,
                column_key: column_text,
            });
        }
        matrix.rows[r][c] = row[value_index].clone();
    }

    log_debug!(
        "PIVOT",
        "generic pivot: {} rows -> {} x {}",
        rows.len(),
        matrix.row_count(),
        matrix.col_count()
    );

    Ok(matrix)
}

/// Builds the pivot matching `kind`.
pub fn build_pivot(
    columns: &[Column],
    rows: &[Row],
    kind: PivotKind,
    options: &PivotOptions,
) -> Result<PivotMatrix> {
    match kind {
        PivotKind::Date {
            date_index,
            value_index,
        } => build_date_pivot(columns, rows, date_index, value_index, options),
        PivotKind::Generic {
            row_key,
            column_key,
            value_index,
        } => build_generic_pivot(columns, rows, row_key, column_key, value_index, options),
    }
}
