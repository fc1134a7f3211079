//! Structured result of a report build.
//!
//! This is what the output layer renders. It serializes to JSON as-is.

use crate::aggregator::{AggregatedRow, SummaryTable, Threshold};
use crate::parser::table::Table;
use crate::pivot::PivotRow;
use serde::Serialize;

/// Full result for one uploaded workbook
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Name of the sheet the records came from
    pub source_sheet: String,

    /// Normalized header of the clock time column
    pub time_column: String,

    /// One entry per category, in output order
    pub categories: Vec<CategoryReport>,
}

impl Report {
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// Everything produced for one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_constraint: Option<Threshold>,

    /// Filtered raw records, all columns, normalized headers
    pub data: Table,

    /// Pivot header: hierarchy columns then the time column
    pub pivot_columns: Vec<String>,

    /// Sorted aggregate, index-aligned with `pivot`
    pub aggregated: Vec<AggregatedRow>,

    /// Masked, tagged display rows
    pub pivot: Vec<PivotRow>,

    pub summary: SummaryTable,

    pub warnings: ParseWarnings,
}

impl CategoryReport {
    pub fn data_sheet_name(&self) -> String {
        format!("Data {}", self.category)
    }

    pub fn pivot_sheet_name(&self) -> String {
        format!("Pivot {}", self.category)
    }
}

/// Values absorbed as "does not satisfy" or "no time" instead of failing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseWarnings {
    pub unparseable_distance: usize,
    pub unparseable_time: usize,

    /// Kept in the data sheet but absent from the pivot
    pub incomplete_hierarchy: usize,
}

impl ParseWarnings {
    pub fn total(&self) -> usize {
        self.unparseable_distance + self.unparseable_time + self.incomplete_hierarchy
    }
}
