//! Plain-text report summary for the terminal.

use crate::report::Report;
use crate::utils::config::{GRAND_TOTAL_LABEL, SUMMARY_COUNT_HEADER};
use std::fmt::Write;

/// Render per-category counts and summary tables as text
pub fn render_text_summary(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Source sheet: {}", report.source_sheet);
    let _ = writeln!(out, "Time column:  {}", report.time_column);

    for category in &report.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}]", category.category);
        if let Some(threshold) = &category.distance_constraint {
            let _ = writeln!(out, "  Distance <= {}", threshold.max);
        }
        let _ = writeln!(out, "  Records:    {}", category.data.row_count());
        let _ = writeln!(out, "  Pivot rows: {}", category.pivot.len());

        let duplicates = category.pivot.iter().filter(|r| r.duplicate_leaf).count();
        if duplicates > 0 {
            let _ = writeln!(out, "  Duplicate DU IDs: {} rows", duplicates);
        }

        let warnings = category.warnings;
        if warnings.total() > 0 {
            let _ = writeln!(
                out,
                "  Unparseable: {} distance, {} time",
                warnings.unparseable_distance, warnings.unparseable_time
            );
            if warnings.incomplete_hierarchy > 0 {
                let _ = writeln!(
                    out,
                    "  Left out of pivot (empty hierarchy cell): {}",
                    warnings.incomplete_hierarchy
                );
            }
        }

        let width = category
            .summary
            .rows
            .iter()
            .map(|r| r.company.chars().count())
            .chain([GRAND_TOTAL_LABEL.len(), "Company".len()])
            .max()
            .unwrap_or(0);

        let _ = writeln!(out, "  {:<width$}  {}", "Company", SUMMARY_COUNT_HEADER);
        for row in &category.summary.rows {
            let _ = writeln!(out, "  {:<width$}  {}", row.company, row.distinct_names);
        }
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            GRAND_TOTAL_LABEL, category.summary.grand_total
        );
    }

    out
}
