//! Category filtering and aggregation of clock records.
//!
//! This module transforms the source table into:
//! - Per-category filtered records
//! - One earliest-time row per hierarchy key
//! - Distinct-name counts per company

pub mod earliest_time;
pub mod filter;
pub mod summary;

// Re-export main types and functions
pub use earliest_time::{aggregate_earliest, fold_earliest, AggregatedRow, Aggregation};
pub use filter::{filter_category, matches_category, Category, CategoryConfig, FilterOutcome, Threshold};
pub use summary::{summarize, SummaryRow, SummaryTable};
