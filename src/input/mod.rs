//! Input workbook loading.

pub mod xlsx;

pub use xlsx::{load_workbook, load_workbook_from_bytes};
