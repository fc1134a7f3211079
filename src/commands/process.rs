//! Process command implementation.
//!
//! The process command:
//! 1. Loads every sheet of the input workbook
//! 2. Builds the per-category report
//! 3. Renders and writes the processed workbook
//! 4. Optionally writes the JSON report and prints a summary

use super::models::ProcessArgs;
use crate::input::load_workbook;
use crate::output::{render_text_summary, write_report, write_workbook};
use crate::report::build_report;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the process command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input workbook
/// * Missing `Clock Detail Report` sheet, too few columns, missing columns
/// * File write errors
///
/// Nothing is written unless the whole report was built.
pub fn execute_process(args: ProcessArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Processing workbook: {}", args.input.display());

    // Step 1: Load
    info!("Step 1/3: Loading workbook...");
    let workbook = load_workbook(&args.input).context("Failed to read input workbook")?;
    debug!("Loaded sheets: {:?}", workbook.sheet_names());

    // Step 2: Build
    info!("Step 2/3: Building report...");
    let report = build_report(&workbook).context("Failed to build report")?;

    for category in &report.categories {
        if category.warnings.total() > 0 {
            debug!(
                "Category {}: {} unparseable distances, {} unparseable times, {} incomplete hierarchies",
                category.category,
                category.warnings.unparseable_distance,
                category.warnings.unparseable_time,
                category.warnings.incomplete_hierarchy
            );
        }
    }

    // Step 3: Write
    info!("Step 3/3: Writing output files...");
    write_workbook(&workbook, &report, &args.layout, &args.output)
        .context("Failed to write processed workbook")?;
    info!("✓ Workbook written to: {}", args.output.display());

    if let Some(json_path) = &args.json_output {
        write_report(&report, json_path).context("Failed to write report JSON")?;
        info!("✓ Report JSON written to: {}", json_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(60));
        println!("CLOCK REPORT SUMMARY");
        println!("{}", "=".repeat(60));
        print!("{}", render_text_summary(&report));
        println!("{}", "=".repeat(60));
    }

    let elapsed = start_time.elapsed();
    info!("Processing completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate process arguments
///
/// **Public** - can be called before execute_process for early validation
pub fn validate_args(args: &ProcessArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if !has_xlsx_extension(&args.input) {
        anyhow::bail!("Input must be an .xlsx workbook: {}", args.input.display());
    }

    if !has_xlsx_extension(&args.output) {
        anyhow::bail!("Output must be an .xlsx workbook: {}", args.output.display());
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input path");
    }

    if let Some(json_path) = &args.json_output {
        if json_path == &args.output || json_path == &args.input {
            anyhow::bail!("JSON output path must differ from the workbook paths");
        }
    }

    Ok(())
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}
