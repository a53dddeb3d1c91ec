//! FILENAME: tests/common/mod.rs
//! Fixtures and assertion helpers for display-engine integration tests.

#![allow(dead_code)]

use display_engine::{transform, DisplayType, PipelineOptions, PipelineOutput};
use response_engine::{CellValue, Column, ColumnType, QueryResult, Row};

// ============================================================================
// FIXTURES
// ============================================================================

pub struct SalesFixture;

impl SalesFixture {
    pub fn data() -> Vec<(&'static str, &'static str, f64)> {
        vec![
            ("North", "Widget", 10000.0),
            ("North", "Gadget", 8000.0),
            ("South", "Widget", 15000.0),
            ("South", "Gadget", 11000.0),
            ("East", "Widget", 9000.0),
        ]
    }

    /// region x product x sales, two groupable keys.
    pub fn two_key_result() -> QueryResult {
        let columns = vec![
            Column::new("region", ColumnType::String).groupable(),
            Column::new("product", ColumnType::String).groupable(),
            Column::new("sales", ColumnType::DollarAmt).with_display_name("Sales"),
        ];
        let rows = Self::data()
            .into_iter()
            .map(|(region, product, sales)| {
                vec![CellValue::from(region), CellValue::from(product), CellValue::from(sales)]
            })
            .collect();
        QueryResult::new(columns, rows)
    }

    /// region x sales, one groupable key.
    pub fn one_key_result() -> QueryResult {
        let columns = vec![
            Column::new("region", ColumnType::String).groupable(),
            Column::new("sales", ColumnType::DollarAmt),
        ];
        let rows = Self::data()
            .into_iter()
            .map(|(region, _, sales)| vec![CellValue::from(region), CellValue::from(sales)])
            .collect();
        QueryResult::new(columns, rows)
    }
}

/// `count` labelled rows with one number column.
pub fn labelled_result(count: usize) -> QueryResult {
    let columns = vec![
        Column::new("label", ColumnType::String).groupable(),
        Column::new("amount", ColumnType::Quantity),
    ];
    let rows: Vec<Row> = (0..count)
        .map(|i| vec![CellValue::text(format!("L{:02}", i)), CellValue::from(i as f64)])
        .collect();
    QueryResult::new(columns, rows)
}

/// Monthly sales as a backend JSON payload (epoch seconds, UTC).
pub fn monthly_sales_json() -> &'static str {
    r#"{
        "columns": [
            {"name": "sale_month", "display_name": "Sale Month", "type": "DATE", "groupable": true},
            {"name": "sales", "display_name": "Sales", "type": "DOLLAR_AMT"}
        ],
        "rows": [
            [1625097600, 700],
            [1577836800, 100],
            [1584230400, 300],
            [1609459200, 400]
        ]
    }"#
}

// ============================================================================
// RUNNERS
// ============================================================================

pub fn run(result: &QueryResult) -> PipelineOutput {
    transform(result, &PipelineOptions::default()).expect("transform succeeds")
}

pub fn run_as(result: &QueryResult, display_type: DisplayType) -> PipelineOutput {
    let options = PipelineOptions {
        requested_display_type: Some(display_type),
        ..PipelineOptions::default()
    };
    let output = transform(result, &options).expect("transform succeeds");
    assert_eq!(output.display_type, display_type, "requested type should be supported");
    output
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

pub fn assert_supports(output: &PipelineOutput, expected: &[DisplayType]) {
    for display_type in expected {
        assert!(
            output.supported_display_types.contains(display_type),
            "expected {} in {:?}",
            display_type,
            output.supported_display_types
        );
    }
}

pub fn assert_excludes(output: &PipelineOutput, excluded: &[DisplayType]) {
    for display_type in excluded {
        assert!(
            !output.supported_display_types.contains(display_type),
            "did not expect {} in {:?}",
            display_type,
            output.supported_display_types
        );
    }
}
