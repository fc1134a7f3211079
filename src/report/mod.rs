//! Report assembly and the structured result schema.
//!
//! # Example
//! ```ignore
//! use clock_report::input::load_workbook;
//! use clock_report::report::build_report;
//!
//! let workbook = load_workbook("clock.xlsx")?;
//! let report = build_report(&workbook)?;
//! for category in &report.categories {
//!     println!("{}: {} pivot rows", category.category, category.pivot.len());
//! }
//! ```

mod assembler;
pub mod schema;

// Public API exports
pub use assembler::{build_category_reports, build_report};
pub use schema::{CategoryReport, ParseWarnings, Report};
