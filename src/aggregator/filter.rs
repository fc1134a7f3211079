//! Category filter.
//!
//! A row belongs to a category when its category cell contains the
//! category name, case-insensitively. ECNB additionally requires a
//! parseable distance at or below 500; ECMW has no distance rule.

use crate::parser::schema::ColumnSchema;
use crate::parser::table::{Cell, Row, Table};
use crate::parser::values::parse_distance;
use crate::utils::config::ECNB_MAX_DISTANCE;
use log::debug;
use serde::Serialize;
use std::fmt;

/// The two report partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ecnb,
    Ecmw,
}

impl Category {
    /// Every category, in output order
    pub const ALL: [Category; 2] = [Category::Ecnb, Category::Ecmw];

    pub fn name(self) -> &'static str {
        match self {
            Category::Ecnb => "ECNB",
            Category::Ecmw => "ECMW",
        }
    }

    pub fn config(self) -> CategoryConfig {
        match self {
            Category::Ecnb => CategoryConfig::new(self.name())
                .with_distance_constraint(Threshold::at_most(ECNB_MAX_DISTANCE)),
            Category::Ecmw => CategoryConfig::new(self.name()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive upper bound on distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub max: f64,
}

impl Threshold {
    pub fn at_most(max: f64) -> Self {
        Self { max }
    }

    /// NaN never satisfies the bound
    pub fn allows(&self, value: f64) -> bool {
        value <= self.max
    }
}

/// Parameters of one run of the per-category pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryConfig {
    pub name: String,
    pub distance_constraint: Option<Threshold>,
}

impl CategoryConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distance_constraint: None,
        }
    }

    pub fn with_distance_constraint(mut self, threshold: Threshold) -> Self {
        self.distance_constraint = Some(threshold);
        self
    }

    /// Configs for `Category::ALL`
    pub fn defaults() -> Vec<CategoryConfig> {
        Category::ALL.iter().map(|c| c.config()).collect()
    }
}

/// Rows kept by the filter
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub rows: Vec<Row>,

    /// Category-matching rows dropped because their distance did not parse
    pub unparseable_distance: usize,
}

/// Case-insensitive substring match of the category cell
pub fn matches_category(cell: &Cell, category: &str) -> bool {
    if category.is_empty() {
        return true;
    }
    cell.to_string()
        .to_lowercase()
        .contains(&category.to_lowercase())
}

/// Select the rows of `table` belonging to `config`
///
/// **Public** - first stage of the per-category pipeline
///
/// Source order is preserved. Rows are cloned; the source table is
/// never modified.
pub fn filter_category(
    table: &Table,
    schema: &ColumnSchema,
    config: &CategoryConfig,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for row in &table.rows {
        if !matches_category(schema.category_cell(row), &config.name) {
            continue;
        }

        if let Some(threshold) = &config.distance_constraint {
            match parse_distance(schema.distance_cell(row)) {
                Some(distance) if threshold.allows(distance) => {}
                Some(_) => continue,
                None => {
                    outcome.unparseable_distance += 1;
                    continue;
                }
            }
        }

        outcome.rows.push(row.clone());
    }

    debug!(
        "Category {}: kept {} of {} rows ({} with unparseable distance)",
        config.name,
        outcome.rows.len(),
        table.row_count(),
        outcome.unparseable_distance
    );

    outcome
}
