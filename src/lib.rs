//! Clock Report
//!
//! Turns a "Clock Detail Report" workbook into per-category data sheets,
//! masked pivot views with duplicate DU ID highlighting, and per-company
//! distinct-name summaries.
//!
//! This crate provides the core implementation for the
//! `clock-report` CLI tool.
//!
//! ## Pipeline
//!
//! ```ignore
//! use clock_report::input::load_workbook;
//! use clock_report::output::{write_workbook, LayoutConfig};
//! use clock_report::report::build_report;
//!
//! let workbook = load_workbook("ClockReport.xlsx")?;
//! let report = build_report(&workbook)?;
//! write_workbook(&workbook, &report, &LayoutConfig::default(), "Processed_ClockReport.xlsx")?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod pivot;
pub mod report;
pub mod utils;
