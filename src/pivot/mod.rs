//! Pivot view: sorting, label masking, duplicate leaves and style tags.

pub mod duplicates;
pub mod styles;
pub mod view;

// Re-export main types and functions
pub use duplicates::detect_duplicate_leaves;
pub use styles::{tag_rows, PivotCell, PivotRow, StyleTag};
pub use view::{build_pivot_view, sort_aggregated, MaskedCell, MaskedRow};
