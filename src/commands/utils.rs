use crate::aggregator::{filter_category, CategoryConfig};
use crate::input::load_workbook;
use crate::parser::resolve_schema;
use crate::utils::config::{
    CATEGORY_COLUMN_INDEX, DISTANCE_COLUMN_INDEX, ECNB_MAX_DISTANCE, HIERARCHY_COLUMNS,
    MIN_COLUMN_COUNT, REPORT_SCHEMA_VERSION, SOURCE_SHEET_NAME, TIME_COLUMN_INDEX,
};
use crate::utils::error::SchemaError;
use anyhow::{Context, Result};
use std::path::Path;

/// Check an input workbook against the input contract without writing anything
pub fn validate_input_file(file_path: impl AsRef<Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    println!("Validating workbook: {}", file_path.display());

    let workbook = load_workbook(file_path).context("Failed to read input workbook")?;
    let source = workbook
        .sheet(SOURCE_SHEET_NAME)
        .ok_or_else(|| SchemaError::MissingSheet(SOURCE_SHEET_NAME.to_string()))?;
    let schema = resolve_schema(source)?;

    println!("✓ Valid Clock Detail Report");
    println!("  Sheets: {}", workbook.sheet_names().join(", "));
    println!("  Records: {}", source.row_count());
    println!("  Time column: {}", schema.time_column);

    for config in CategoryConfig::defaults() {
        let outcome = filter_category(source, &schema, &config);
        println!("  {} records: {}", config.name, outcome.rows.len());
    }

    Ok(())
}

/// Display the input contract
pub fn display_schema(show_details: bool) {
    println!("Clock Report Input Contract");
    println!("Report Schema Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Workbook:");
        println!("  sheet '{}' is required", SOURCE_SHEET_NAME);
        println!("  at least {} columns, first row is the header", MIN_COLUMN_COUNT);
        println!();
        println!("Columns by position (0-based):");
        println!("  {}: clock time       - earliest per group is reported", TIME_COLUMN_INDEX);
        println!("  {}: distance         - ECNB keeps <= {}", DISTANCE_COLUMN_INDEX, ECNB_MAX_DISTANCE);
        println!("  {}: category         - matched case-insensitively", CATEGORY_COLUMN_INDEX);
        println!();
        println!("Columns by name:");
        for name in HIERARCHY_COLUMNS {
            println!("  {}", name);
        }
    } else {
        println!("Use --show for detailed contract information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Clock Report v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Turns a Clock Detail Report into ECNB/ECMW data, pivot and summary sheets.");
}
