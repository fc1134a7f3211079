//! Table abstraction, lenient value parsing and schema resolution.
//!
//! This module handles:
//! - The typed `Table` / `Cell` model every other module consumes
//! - Parsing distances and clock times without ever failing
//! - Resolving the positional input contract to named columns

pub mod schema;
pub mod table;
pub mod values;

// Re-export main types
pub use schema::{resolve_schema, ColumnSchema, HierarchyKey};
pub use table::{Cell, Row, SourceWorkbook, Table};
pub use values::{parse_distance, parse_timestamp, parse_timestamp_text};
