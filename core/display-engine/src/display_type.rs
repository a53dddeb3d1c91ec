//! FILENAME: core/display-engine/src/display_type.rs
//! Display types - identifiers of the visualizations a result can render as.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Table,
    PivotTable,
    Column,
    Bar,
    Line,
    Pie,
    StackedColumn,
    StackedBar,
    StackedLine,
    Bubble,
    Heatmap,
    #[serde(rename = "single-value")]
    SingleValue,
    Text,
    Suggestion,
    Help,
    Html,
}

impl DisplayType {
    pub const ALL: [DisplayType; 16] = [
        DisplayType::Table,
        DisplayType::PivotTable,
        DisplayType::Column,
        DisplayType::Bar,
        DisplayType::Line,
        DisplayType::Pie,
        DisplayType::StackedColumn,
        DisplayType::StackedBar,
        DisplayType::StackedLine,
        DisplayType::Bubble,
        DisplayType::Heatmap,
        DisplayType::SingleValue,
        DisplayType::Text,
        DisplayType::Suggestion,
        DisplayType::Help,
        DisplayType::Html,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Table => "table",
            DisplayType::PivotTable => "pivot_table",
            DisplayType::Column => "column",
            DisplayType::Bar => "bar",
            DisplayType::Line => "line",
            DisplayType::Pie => "pie",
            DisplayType::StackedColumn => "stacked_column",
            DisplayType::StackedBar => "stacked_bar",
            DisplayType::StackedLine => "stacked_line",
            DisplayType::Bubble => "bubble",
            DisplayType::Heatmap => "heatmap",
            DisplayType::SingleValue => "single-value",
            DisplayType::Text => "text",
            DisplayType::Suggestion => "suggestion",
            DisplayType::Help => "help",
            DisplayType::Html => "html",
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(
            self,
            DisplayType::Column
                | DisplayType::Bar
                | DisplayType::Line
                | DisplayType::Pie
                | DisplayType::StackedColumn
                | DisplayType::StackedBar
                | DisplayType::StackedLine
                | DisplayType::Bubble
                | DisplayType::Heatmap
        )
    }

    /// Types the backend dictates verbatim; no data analysis applies.
    pub fn is_passthrough(&self) -> bool {
        matches!(
            self,
            DisplayType::Suggestion | DisplayType::Help | DisplayType::Html
        )
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown display type: {}", s))
    }
}
