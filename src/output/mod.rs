//! Output writers for report data.
//!
//! This module handles writing a finished report in various formats:
//! - The processed workbook (source sheets, data, pivot and summary sheets)
//! - A JSON dump of the structured report
//! - A plain-text summary for the terminal

pub mod json;
pub mod text;
pub mod xlsx;

// Re-export main functions
pub use json::write_report;
pub use text::render_text_summary;
pub use xlsx::{render_workbook, write_workbook, LayoutConfig};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of an output file
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
