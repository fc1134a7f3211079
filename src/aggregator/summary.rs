//! Per-company summary of distinct names.
//!
//! Computed on the filtered records, before time aggregation. The grand
//! total is the sum of the per-company counts, so a name that appears
//! under two companies is counted once for each.

use crate::parser::schema::ColumnSchema;
use crate::parser::table::{Cell, Row};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct name count for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub company: String,
    pub distinct_names: usize,
}

/// Summary table plus grand total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    /// One row per company, company names in lexicographic order
    pub rows: Vec<SummaryRow>,
    pub grand_total: usize,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count distinct names per company
///
/// **Public** - summary stage of the per-category pipeline
///
/// Records with an empty company cell are not grouped; empty name cells
/// are not counted (the company still gets a row). Whitespace-only text
/// is a value like any other.
pub fn summarize(rows: &[Row], schema: &ColumnSchema) -> SummaryTable {
    let mut names_by_company: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for row in rows {
        let company = schema.company_cell(row);
        if matches!(company, Cell::Empty) {
            continue;
        }

        let names = names_by_company.entry(company.to_string()).or_default();
        let name = schema.name_cell(row);
        if !matches!(name, Cell::Empty) {
            names.insert(name.to_string());
        }
    }

    let summary_rows: Vec<SummaryRow> = names_by_company
        .into_iter()
        .map(|(company, names)| SummaryRow {
            company,
            distinct_names: names.len(),
        })
        .collect();

    let grand_total = summary_rows.iter().map(|r| r.distinct_names).sum();

    debug!(
        "Summary: {} companies, grand total {}",
        summary_rows.len(),
        grand_total
    );

    SummaryTable {
        rows: summary_rows,
        grand_total,
    }
}
