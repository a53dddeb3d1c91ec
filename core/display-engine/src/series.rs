//! FILENAME: core/display-engine/src/series.rs
//! Chart Series - point data handed to chart renderers.
//!
//! Points borrow the row and column list they were built from so a renderer
//! can drill down without the series owning any table data.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use response_engine::{
    format_element, groupable_indices, is_number_type, CellValue, Column, Row,
};
use pivot_engine::PivotKind;

/// Formats a cell for display given its column.
pub type Formatter = fn(&CellValue, &Column) -> String;

/// Most charts plot a handful of measures per label.
pub type SeriesValues = SmallVec<[f64; 4]>;

// ============================================================================
// POINT TYPES
// ============================================================================

/// One label of a single-key chart with one value per number column.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint<'a> {
    pub label: CellValue,
    pub values: SeriesValues,
    #[serde(skip)]
    pub orig_row: &'a Row,
    #[serde(skip)]
    pub orig_columns: &'a [Column],
}

/// One cell of a two-key chart (bubble, heatmap, stacked charts).
#[derive(Debug, Clone, Serialize)]
pub struct LabeledPoint<'a> {
    pub label_x: CellValue,
    pub label_y: CellValue,
    /// Numeric when the source cell coerces, otherwise the raw cell.
    pub value: CellValue,
    #[serde(skip)]
    pub orig_row: &'a Row,
    #[serde(skip)]
    pub orig_columns: &'a [Column],
}

macro_rules! impl_formatting {
    ($point:ident) => {
        impl<'a> $point<'a> {
            pub fn formatter(&self) -> Formatter {
                format_element
            }

            /// Formats a cell of the originating row.
            pub fn format_cell(&self, index: usize) -> Option<String> {
                let value = self.orig_row.get(index)?;
                let column = self.orig_columns.get(index)?;
                Some((self.formatter())(value, column))
            }
        }
    };
}

impl_formatting!(SeriesPoint);
impl_formatting!(LabeledPoint);

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChartSeries<'a> {
    Flat(Vec<SeriesPoint<'a>>),
    Labeled(Vec<LabeledPoint<'a>>),
}

impl<'a> ChartSeries<'a> {
    pub fn len(&self) -> usize {
        match self {
            ChartSeries::Flat(points) => points.len(),
            ChartSeries::Labeled(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Folds rows by label in first-seen order. Values come from every visible
/// number column other than the label, in column order; a repeated label
/// adds into its point. Rows must be rectangular (`QueryResult::validate`).
pub fn build_flat_series<'a>(
    columns: &'a [Column],
    rows: &'a [Row],
    label_index: usize,
) -> Vec<SeriesPoint<'a>> {
    let value_indices: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != label_index && c.is_visible && is_number_type(c))
        .map(|(i, _)| i)
        .collect();

    let mut points: Vec<SeriesPoint<'a>> = Vec::new();
    let mut by_label: FxHashMap<String, usize> = FxHashMap::default();

    for row in rows {
        let label = &row[label_index];
        let values: SeriesValues = value_indices.iter().map(|&i| row[i].as_number()).collect();

        let key = label.display_value();
        match by_label.get(&key).copied() {
            Some(existing) => {
                let point = &mut points[existing];
                for (sum, value) in point.values.iter_mut().zip(values) {
                    *sum += value;
                }
            }
            None => {
                by_label.insert(key, points.len());
                points.push(SeriesPoint {
                    label: label.clone(),
                    values,
                    orig_row: row,
                    orig_columns: columns,
                });
            }
        }
    }

    points
}

/// One point per row, no folding. Rows must be rectangular.
pub fn build_labeled_series<'a>(
    columns: &'a [Column],
    rows: &'a [Row],
    row_key: usize,
    column_key: usize,
    value_index: usize,
) -> Vec<LabeledPoint<'a>> {
    rows.iter()
        .map(|row| {
            let raw = &row[value_index];
            let value = raw.try_number().map(CellValue::Number).unwrap_or_else(|| raw.clone());
            LabeledPoint {
                label_x: row[column_key].clone(),
                label_y: row[row_key].clone(),
                value,
                orig_row: row,
                orig_columns: columns,
            }
        })
        .collect()
}

/// Builds the series for the result's key layout: flat for one groupable
/// key, labeled for the two-key pivot shape, none otherwise.
pub fn build_chart_series<'a>(columns: &'a [Column], rows: &'a [Row]) -> Option<ChartSeries<'a>> {
    let groupables = groupable_indices(columns);
    match groupables.as_slice() {
        [label_index] => Some(ChartSeries::Flat(build_flat_series(columns, rows, *label_index))),
        [_, _] => match PivotKind::generic(columns)? {
            PivotKind::Generic {
                row_key,
                column_key,
                value_index,
            } => Some(ChartSeries::Labeled(build_labeled_series(
                columns,
                rows,
                row_key,
                column_key,
                value_index,
            ))),
            PivotKind::Date { .. } => None,
        },
        _ => None,
    }
}
