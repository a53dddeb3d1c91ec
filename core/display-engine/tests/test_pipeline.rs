//! FILENAME: tests/test_pipeline.rs
//! Integration tests for the response transformation pipeline.

mod common;

use common::{
    assert_excludes, assert_supports, labelled_result, monthly_sales_json, run, run_as,
    SalesFixture,
};
use display_engine::{
    transform, ChartSeries, DisplayType, PipelineError, PipelineOptions,
};
use response_engine::{AggregationType, CellValue, Column, ColumnType, QueryResult, Row};

// ============================================================================
// CAPABILITIES
// ============================================================================

#[test]
fn test_no_groupable_columns_supports_only_table() {
    for column_count in 1..4 {
        let columns: Vec<Column> = (0..column_count)
            .map(|i| Column::new(format!("c{}", i), ColumnType::Quantity))
            .collect();
        let rows: Vec<Row> = (0..3)
            .map(|r| (0..column_count).map(|c| CellValue::from((r * c) as f64)).collect())
            .collect();
        let output = run(&QueryResult::new(columns, rows));
        assert_eq!(output.supported_display_types, vec![DisplayType::Table]);
    }
}

#[test]
fn test_single_cell_is_single_value() {
    for column_type in [ColumnType::DollarAmt, ColumnType::String, ColumnType::Percent] {
        let result = QueryResult::new(
            vec![Column::new("total", column_type).groupable()],
            vec![vec![CellValue::from(42.0)]],
        );
        let output = run(&result);
        assert_eq!(output.supported_display_types, vec![DisplayType::SingleValue]);
        assert_eq!(output.display_type, DisplayType::SingleValue);
    }
}

#[test]
fn test_two_keys_five_rows() {
    let output = run(&SalesFixture::two_key_result());

    assert_supports(
        &output,
        &[
            DisplayType::Table,
            DisplayType::PivotTable,
            DisplayType::StackedColumn,
            DisplayType::Bubble,
            DisplayType::Heatmap,
        ],
    );
    assert_excludes(&output, &[DisplayType::Pie, DisplayType::StackedLine]);
    assert_eq!(output.display_type, DisplayType::PivotTable);
}

#[test]
fn test_one_key_twelve_rows_excludes_pie() {
    let output = run(&labelled_result(12));
    assert_supports(
        &output,
        &[DisplayType::Table, DisplayType::Column, DisplayType::Bar, DisplayType::Line],
    );
    assert_excludes(&output, &[DisplayType::Pie]);
}

#[test]
fn test_unsupported_request_falls_back() {
    let options = PipelineOptions {
        requested_display_type: Some(DisplayType::Heatmap),
        ..PipelineOptions::default()
    };
    let output = transform(&labelled_result(4), &options).unwrap();
    assert_eq!(output.display_type, DisplayType::Table);
}

#[test]
fn test_prior_row_count_narrows_pivot() {
    let options = PipelineOptions {
        prior_row_count: Some(5000),
        ..PipelineOptions::default()
    };
    let output = transform(&SalesFixture::two_key_result(), &options).unwrap();
    assert_eq!(output.supported_display_types, vec![DisplayType::Table]);
    assert!(output.pivot_table_data.is_none());
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn test_west_east_sum() {
    let result = QueryResult::new(
        vec![
            Column::new("region", ColumnType::String).groupable(),
            Column::new("sales", ColumnType::DollarAmt),
        ],
        vec![
            vec![CellValue::from("West"), CellValue::from(100.0)],
            vec![CellValue::from("West"), CellValue::from(50.0)],
            vec![CellValue::from("East"), CellValue::from(30.0)],
        ],
    );
    let options = PipelineOptions {
        requested_display_type: Some(DisplayType::Column),
        assume_sorted: true,
        ..PipelineOptions::default()
    };

    let output = transform(&result, &options).unwrap();

    assert_eq!(
        output.chart_rows,
        Some(vec![
            vec![CellValue::from("West"), CellValue::from(150.0)],
            vec![CellValue::from("East"), CellValue::from(30.0)],
        ])
    );
    // the table keeps the raw rows
    assert_eq!(output.table_data, Some(result.rows.clone()));
}

#[test]
fn test_single_label_collapses_to_one_row() {
    for a in [0.5, 7.0, -3.25] {
        let result = QueryResult::new(
            vec![
                Column::new("region", ColumnType::String).groupable(),
                Column::new("sales", ColumnType::DollarAmt),
            ],
            vec![
                vec![CellValue::from("West"), CellValue::from(a)],
                vec![CellValue::from("West"), CellValue::from(a)],
            ],
        );
        let output = run_as(&result, DisplayType::Bar);
        assert_eq!(
            output.chart_rows,
            Some(vec![vec![CellValue::from("West"), CellValue::from(2.0 * a)]])
        );
    }
}

#[test]
fn test_count_versus_count_distinct() {
    let rows = vec![
        vec![CellValue::from("A"), CellValue::from(5.0), CellValue::from(5.0)],
        vec![CellValue::from("A"), CellValue::from(5.0), CellValue::from(5.0)],
        vec![CellValue::from("A"), CellValue::from(7.0), CellValue::from(7.0)],
        vec![CellValue::from("B"), CellValue::from(1.0), CellValue::from(1.0)],
    ];
    let result = QueryResult::new(
        vec![
            Column::new("label", ColumnType::String).groupable(),
            Column::new("n", ColumnType::Quantity).with_aggregation(AggregationType::Count),
            Column::new("d", ColumnType::Quantity)
                .with_aggregation(AggregationType::CountDistinct),
        ],
        rows,
    );

    let output = run_as(&result, DisplayType::Column);

    let chart_rows = output.chart_rows.expect("chart rows");
    assert_eq!(chart_rows[0], vec![CellValue::from("A"), CellValue::from(3.0), CellValue::from(2.0)]);
    assert_eq!(chart_rows[1], vec![CellValue::from("B"), CellValue::from(1.0), CellValue::from(1.0)]);
}

#[test]
fn test_strict_mode_rejects_non_numeric() {
    let result = QueryResult::new(
        vec![
            Column::new("region", ColumnType::String).groupable(),
            Column::new("sales", ColumnType::DollarAmt),
        ],
        vec![
            vec![CellValue::from("West"), CellValue::from("n/a")],
            vec![CellValue::from("East"), CellValue::from(30.0)],
        ],
    );

    let lenient = run_as(&result, DisplayType::Column);
    let rows = lenient.chart_rows.expect("chart rows");
    assert!(matches!(rows[1][1], CellValue::Number(n) if n.is_nan()));

    let options = PipelineOptions {
        requested_display_type: Some(DisplayType::Column),
        strict: true,
        ..PipelineOptions::default()
    };
    let err = transform(&result, &options).unwrap_err();
    assert!(matches!(err, PipelineError::Coercion { .. }));
}

// ============================================================================
// PIVOTS
// ============================================================================

#[test]
fn test_generic_pivot_output() {
    let output = run_as(&SalesFixture::two_key_result(), DisplayType::PivotTable);

    let columns = output.pivot_table_columns.expect("pivot columns");
    let rows = output.pivot_table_data.expect("pivot rows");

    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["region", "Gadget", "Widget"]);
    assert!(columns[0].frozen);

    // one row per distinct region, sorted
    let regions: Vec<CellValue> = rows.iter().map(|r| r[0].clone()).collect();
    assert_eq!(
        regions,
        vec![CellValue::from("East"), CellValue::from("North"), CellValue::from("South")]
    );
    assert_eq!(rows[0][1], CellValue::from(""));
    assert_eq!(rows[0][2], CellValue::from(9000.0));
    assert_eq!(rows[2][1], CellValue::from(11000.0));

    let populated = rows
        .iter()
        .flat_map(|r| r.iter().skip(1))
        .filter(|c| **c != CellValue::from(""))
        .count();
    assert_eq!(populated, SalesFixture::data().len());
}

#[test]
fn test_pivot_collision_strict() {
    let mut result = SalesFixture::two_key_result();
    result.rows.push(vec![
        CellValue::from("North"),
        CellValue::from("Widget"),
        CellValue::from(1.0),
    ]);

    let output = run_as(&result, DisplayType::PivotTable);
    let rows = output.pivot_table_data.expect("pivot rows");
    // North / Widget, last write wins
    assert_eq!(rows[1][2], CellValue::from(1.0));

    let options = PipelineOptions {
        requested_display_type: Some(DisplayType::PivotTable),
        strict: true,
        ..PipelineOptions::default()
    };
    let err = transform(&result, &options).unwrap_err();
    assert!(matches!(err, PipelineError::PivotCollision { .. }));
}

#[test]
fn test_date_pivot_from_json() {
    let result = QueryResult::from_json(monthly_sales_json()).unwrap();
    let output = run(&result);

    assert_supports(&output, &[DisplayType::Pie, DisplayType::PivotTable]);
    assert_eq!(output.display_type, DisplayType::PivotTable);

    let columns = output.pivot_table_columns.expect("pivot columns");
    let rows = output.pivot_table_data.expect("pivot rows");
    assert_eq!(columns.len(), 1 + 2);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0], vec![CellValue::from("January"), CellValue::from(100.0), CellValue::from(400.0)]);
    assert_eq!(rows[2][1], CellValue::from(300.0));
    assert_eq!(rows[6][2], CellValue::from(700.0));
}

// ============================================================================
// CHART SERIES
// ============================================================================

#[test]
fn test_flat_chart_series() {
    let options = PipelineOptions {
        prefer_chart: true,
        ..PipelineOptions::default()
    };
    let output = transform(&SalesFixture::one_key_result(), &options).unwrap();
    assert_eq!(output.display_type, DisplayType::Column);

    let Some(ChartSeries::Flat(points)) = output.chart_series() else {
        panic!("expected a flat series");
    };
    let labels: Vec<String> = points.iter().map(|p| p.label.display_value()).collect();
    assert_eq!(labels, vec!["East", "North", "South"]);
    assert_eq!(points[1].values.as_slice(), &[18000.0]);
    assert_eq!(points[1].format_cell(1).as_deref(), Some("$18,000.00"));
}

#[test]
fn test_flat_chart_series_with_label_in_last_column() {
    let result = QueryResult::new(
        vec![
            Column::new("sales", ColumnType::DollarAmt),
            Column::new("region", ColumnType::String).groupable(),
        ],
        vec![
            vec![CellValue::from(100.0), CellValue::from("West")],
            vec![CellValue::from(30.0), CellValue::from("East")],
            vec![CellValue::from(50.0), CellValue::from("West")],
        ],
    );

    let output = run_as(&result, DisplayType::Column);

    let Some(ChartSeries::Flat(points)) = output.chart_series() else {
        panic!("expected a flat series");
    };
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].label, CellValue::from("East"));
    assert_eq!(points[0].values.as_slice(), &[30.0]);
    assert_eq!(points[1].values.as_slice(), &[150.0]);
}

#[test]
fn test_labeled_chart_series_skips_aggregation() {
    let output = run_as(&SalesFixture::two_key_result(), DisplayType::Heatmap);

    let chart_rows = output.chart_rows.as_ref().expect("chart rows");
    assert_eq!(chart_rows.len(), SalesFixture::data().len());

    let Some(ChartSeries::Labeled(points)) = output.chart_series() else {
        panic!("expected a labeled series");
    };
    assert_eq!(points.len(), 5);
    assert_eq!(points[0].label_y, CellValue::from("East"));
    assert_eq!(points[0].label_x, CellValue::from("Widget"));
    assert_eq!(points[0].value, CellValue::from(9000.0));
}

#[test]
fn test_output_serializes_wire_names() {
    let output = run(&SalesFixture::two_key_result());
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["display_type"], "pivot_table");
    assert_eq!(json["supported_display_types"][0], "table");
    assert!(json.get("chart_rows").is_none());
}
