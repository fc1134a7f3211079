//! Schema resolution for the Clock Detail Report sheet.
//!
//! The input contract mixes positional and named columns:
//! - index 4 is the clock time, index 5 the distance, index 8 the category
//! - `Company`, `Name`, `Account` and `DU ID` are looked up by name
//!
//! `resolve_schema` is the only place that knows about fixed positions.
//! Everything downstream reads rows through the resolved `ColumnSchema`.

use super::table::{row_cell, Cell, Table};
use crate::utils::config::{
    CATEGORY_COLUMN_INDEX, DISTANCE_COLUMN_INDEX, HIERARCHY_COLUMNS, MIN_COLUMN_COUNT,
    TIME_COLUMN_INDEX,
};
use crate::utils::error::SchemaError;
use log::debug;
use serde::Serialize;

/// Resolved column positions of the source sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Normalized header of the time column (index 4)
    pub time_column: String,
    pub time: usize,
    pub distance: usize,
    pub category: usize,
    pub company: usize,
    pub name: usize,
    pub account: usize,
    pub unit_id: usize,
}

/// The four-level grouping key `(company, name, account, unit_id)`.
///
/// Field order is the sort order, so the derived `Ord` is the
/// lexicographic hierarchy order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HierarchyKey {
    pub company: String,
    pub name: String,
    pub account: String,
    pub unit_id: String,
}

impl HierarchyKey {
    pub fn new(
        company: impl Into<String>,
        name: impl Into<String>,
        account: impl Into<String>,
        unit_id: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            name: name.into(),
            account: account.into(),
            unit_id: unit_id.into(),
        }
    }

    /// Values in hierarchy order, outermost first
    pub fn levels(&self) -> [&str; 4] {
        [
            self.company.as_str(),
            self.name.as_str(),
            self.account.as_str(),
            self.unit_id.as_str(),
        ]
    }
}

/// Resolve the column contract against a source table
///
/// # Errors
/// * `SchemaError::TooFewColumns` - fewer than 9 columns
/// * `SchemaError::MissingColumns` - a hierarchy column or the time column
///   is absent after header normalization (every missing name is listed)
pub fn resolve_schema(table: &Table) -> Result<ColumnSchema, SchemaError> {
    if table.column_count() < MIN_COLUMN_COUNT {
        return Err(SchemaError::TooFewColumns {
            found: table.column_count(),
            required: MIN_COLUMN_COUNT,
        });
    }

    let headers = table.normalized_headers();
    let time_column = headers[TIME_COLUMN_INDEX].clone();

    let missing: Vec<String> = HIERARCHY_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(std::iter::once(time_column.clone()))
        .filter(|c| !headers.contains(c))
        .collect();

    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing));
    }

    let position = |name: &str| table.column_index(name).unwrap_or_default();

    let schema = ColumnSchema {
        time: position(time_column.as_str()),
        distance: DISTANCE_COLUMN_INDEX,
        category: CATEGORY_COLUMN_INDEX,
        company: position(HIERARCHY_COLUMNS[0]),
        name: position(HIERARCHY_COLUMNS[1]),
        account: position(HIERARCHY_COLUMNS[2]),
        unit_id: position(HIERARCHY_COLUMNS[3]),
        time_column,
    };

    debug!("Resolved schema for sheet '{}': {:?}", table.name, schema);

    Ok(schema)
}

impl ColumnSchema {
    pub fn time_cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        row_cell(row, self.time)
    }

    pub fn distance_cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        row_cell(row, self.distance)
    }

    pub fn category_cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        row_cell(row, self.category)
    }

    pub fn company_cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        row_cell(row, self.company)
    }

    pub fn name_cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        row_cell(row, self.name)
    }

    /// Hierarchy key of a row
    ///
    /// `None` when any of the four cells is empty; such records take no
    /// part in grouping. Whitespace-only text is a real value.
    pub fn hierarchy_key(&self, row: &[Cell]) -> Option<HierarchyKey> {
        let cells = [self.company, self.name, self.account, self.unit_id].map(|col| row_cell(row, col));
        if cells.iter().any(|cell| matches!(cell, Cell::Empty)) {
            return None;
        }

        let [company, name, account, unit_id] = cells.map(|cell| cell.to_string());
        Some(HierarchyKey {
            company,
            name,
            account,
            unit_id,
        })
    }
}
