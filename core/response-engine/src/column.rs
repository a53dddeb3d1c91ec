//! FILENAME: core/response-engine/src/column.rs
//! PURPOSE: Column metadata as produced by the analytics backend.
//! CONTEXT: Columns are immutable once received. Presentation-only fields
//! live on a decorated copy in `display-engine`, never on this struct.

use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN TYPE
// ============================================================================

/// Backend column type. Unknown type names are preserved instead of
/// rejected so the caller can treat them as unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    String,
    Date,
    DateString,
    DollarAmt,
    Quantity,
    Percent,
    Ratio,
    #[serde(untagged)]
    Unknown(String),
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown(String::new())
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Aggregate applied to a number column when rows sharing a label collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationType {
    #[default]
    Sum,
    Avg,
    Median,
    Min,
    Max,
    /// Sample standard deviation.
    Deviation,
    /// Sample variance.
    Variance,
    /// Number of rows in the group.
    Count,
    /// Number of unique values in the group.
    CountDistinct,
}

// ============================================================================
// COLUMN
// ============================================================================

fn default_true() -> bool {
    true
}

/// A column of a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique within a result.
    pub name: String,

    /// Human readable name. Empty means "use `name`".
    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "type", default)]
    pub column_type: ColumnType,

    /// Valid aggregation/pivot key.
    #[serde(default)]
    pub groupable: bool,

    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default)]
    pub multi_series: bool,

    /// Position in the row.
    #[serde(default)]
    pub index: usize,

    /// Per-column aggregate override (defaults to sum).
    #[serde(default, rename = "aggType", alias = "agg_type", skip_serializing_if = "Option::is_none")]
    pub agg_type: Option<AggregationType>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        Column {
            display_name: name.clone(),
            name,
            column_type,
            groupable: false,
            is_visible: true,
            multi_series: false,
            index: 0,
            agg_type: None,
        }
    }

    pub fn groupable(mut self) -> Self {
        self.groupable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn multi_series(mut self) -> Self {
        self.multi_series = true;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationType) -> Self {
        self.agg_type = Some(aggregation);
        self
    }

    /// The display name, falling back to the raw name.
    pub fn title(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn aggregation(&self) -> AggregationType {
        self.agg_type.unwrap_or_default()
    }
}
