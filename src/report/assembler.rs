//! Report assembly.
//!
//! Runs the same pipeline once per category:
//! 1. Category filter
//! 2. Earliest-time aggregation
//! 3. Sort + pivot masking
//! 4. Duplicate leaf detection + style tags
//! 5. Summary
//!
//! Schema resolution happens once, up front, so a contract violation fails
//! the whole build before any category is processed.

use super::schema::{CategoryReport, ParseWarnings, Report};
use crate::aggregator::{aggregate_earliest, filter_category, summarize, CategoryConfig};
use crate::parser::schema::{resolve_schema, ColumnSchema};
use crate::parser::table::{SourceWorkbook, Table};
use crate::pivot::{build_pivot_view, detect_duplicate_leaves, sort_aggregated, tag_rows};
use crate::utils::config::{HIERARCHY_COLUMNS, REPORT_SCHEMA_VERSION, SOURCE_SHEET_NAME};
use crate::utils::error::{ReportError, SchemaError};
use chrono::Utc;
use log::{debug, info};

/// Build the report for an uploaded workbook
///
/// **Public** - main entry point for the engine
///
/// # Errors
/// * `SchemaError::MissingSheet` - no sheet named `Clock Detail Report`
/// * `SchemaError::TooFewColumns` / `SchemaError::MissingColumns`
///
/// No partial report is ever returned.
pub fn build_report(workbook: &SourceWorkbook) -> Result<Report, ReportError> {
    let source = workbook
        .sheet(SOURCE_SHEET_NAME)
        .ok_or_else(|| SchemaError::MissingSheet(SOURCE_SHEET_NAME.to_string()))?;

    info!(
        "Building report from sheet '{}' ({} rows, {} columns)",
        source.name,
        source.row_count(),
        source.column_count()
    );

    let schema = resolve_schema(source)?;
    let categories = CategoryConfig::defaults()
        .iter()
        .map(|config| build_category(source, &schema, config))
        .collect();

    Ok(Report {
        version: REPORT_SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        source_sheet: source.name.clone(),
        time_column: schema.time_column,
        categories,
    })
}

/// Run the pipeline over `source` for each of `configs`
///
/// **Public** - lets callers drive the engine with a table they built
/// themselves
pub fn build_category_reports(
    source: &Table,
    configs: &[CategoryConfig],
) -> Result<Vec<CategoryReport>, ReportError> {
    let schema = resolve_schema(source)?;
    Ok(configs
        .iter()
        .map(|config| build_category(source, &schema, config))
        .collect())
}

/// One pass of the pipeline
fn build_category(source: &Table, schema: &ColumnSchema, config: &CategoryConfig) -> CategoryReport {
    debug!("Processing category {}", config.name);

    // 1. Filter
    let filtered = filter_category(source, schema, config);

    // 2. Aggregate
    let aggregation = aggregate_earliest(&filtered.rows, schema);

    // 3. Sort + mask
    let sorted = sort_aggregated(aggregation.rows);
    let masked = build_pivot_view(&sorted);

    // 4. Duplicates + tags
    let duplicates = detect_duplicate_leaves(&sorted);
    let pivot = tag_rows(&masked, &duplicates);

    // 5. Summary (on filtered records, not the aggregate)
    let summary = summarize(&filtered.rows, schema);

    let pivot_columns = HIERARCHY_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(std::iter::once(schema.time_column.clone()))
        .collect();

    info!(
        "Category {}: {} records, {} pivot rows, {} companies",
        config.name,
        filtered.rows.len(),
        pivot.len(),
        summary.rows.len()
    );

    CategoryReport {
        category: config.name.clone(),
        distance_constraint: config.distance_constraint,
        data: Table::new(
            format!("Data {}", config.name),
            source.normalized_headers(),
            filtered.rows,
        ),
        pivot_columns,
        aggregated: sorted,
        pivot,
        summary,
        warnings: ParseWarnings {
            unparseable_distance: filtered.unparseable_distance,
            unparseable_time: aggregation.unparseable_time,
            incomplete_hierarchy: aggregation.incomplete_hierarchy,
        },
    }
}
