//! Earliest-time aggregation.
//!
//! Groups filtered records by `(company, name, account, unit_id)` and keeps
//! the minimum parsed clock time of each group. Groups come out in key
//! order, one row per key.

use crate::parser::schema::{ColumnSchema, HierarchyKey};
use crate::parser::table::Row;
use crate::parser::values::parse_timestamp;
use crate::utils::config::{TIME_DISPLAY_FORMAT, UNAVAILABLE_TIME};
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// One aggregation group and its earliest time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow {
    pub key: HierarchyKey,

    /// `None` when no record of the group had a parseable time
    pub earliest: Option<NaiveDateTime>,
}

impl AggregatedRow {
    pub fn new(key: HierarchyKey, earliest: Option<NaiveDateTime>) -> Self {
        Self { key, earliest }
    }

    /// `HH:MM:SS`, or `-` when unavailable
    pub fn time_display(&self) -> String {
        match self.earliest {
            Some(dt) => dt.format(TIME_DISPLAY_FORMAT).to_string(),
            None => UNAVAILABLE_TIME.to_string(),
        }
    }
}

/// Result of aggregating one category's records
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub rows: Vec<AggregatedRow>,

    /// Grouped records whose time did not parse
    pub unparseable_time: usize,

    /// Records left out because a hierarchy cell was empty
    pub incomplete_hierarchy: usize,
}

/// Aggregate filtered records to one row per hierarchy key
///
/// **Public** - main entry point for time aggregation
///
/// # Arguments
/// * `rows` - Records kept by the category filter
/// * `schema` - Resolved column positions
///
/// # Returns
/// One `AggregatedRow` per distinct key, in key order. Records with an
/// empty company, name, account or unit id are not grouped.
pub fn aggregate_earliest(rows: &[Row], schema: &ColumnSchema) -> Aggregation {
    let mut unparseable_time = 0;
    let mut incomplete_hierarchy = 0;
    let mut entries = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(key) = schema.hierarchy_key(row) else {
            incomplete_hierarchy += 1;
            continue;
        };

        let time = parse_timestamp(schema.time_cell(row));
        if time.is_none() {
            unparseable_time += 1;
        }
        entries.push((key, time));
    }

    let aggregated = fold_earliest(entries);

    debug!(
        "Aggregated {} records into {} groups ({} without a parseable time, {} with an incomplete hierarchy)",
        rows.len(),
        aggregated.len(),
        unparseable_time,
        incomplete_hierarchy
    );

    Aggregation {
        rows: aggregated,
        unparseable_time,
        incomplete_hierarchy,
    }
}

/// Group-by-min over `(key, time)` pairs
///
/// Applying this to its own output returns the same rows.
pub fn fold_earliest<I>(entries: I) -> Vec<AggregatedRow>
where
    I: IntoIterator<Item = (HierarchyKey, Option<NaiveDateTime>)>,
{
    let mut groups: BTreeMap<HierarchyKey, Option<NaiveDateTime>> = BTreeMap::new();

    for (key, time) in entries {
        let slot = groups.entry(key).or_insert(None);
        *slot = earlier(*slot, time);
    }

    groups
        .into_iter()
        .map(|(key, earliest)| AggregatedRow::new(key, earliest))
        .collect()
}

/// Minimum of two optional times, ignoring missing ones
fn earlier(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(t), None) | (None, Some(t)) => Some(t),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::table::Cell;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_earlier_ignores_missing() {
        assert_eq!(earlier(None, Some(at(9, 0))), Some(at(9, 0)));
        assert_eq!(earlier(Some(at(9, 0)), Some(at(8, 0))), Some(at(8, 0)));
        assert_eq!(earlier(None, None), None);
    }

    #[test]
    fn test_fold_earliest_groups_by_key() {
        let a = HierarchyKey::new("Acme", "Jo", "A1", "D1");
        let b = HierarchyKey::new("Acme", "Ren", "A2", "D2");

        let rows = fold_earliest(vec![
            (a.clone(), Some(at(9, 15))),
            (b.clone(), None),
            (a.clone(), Some(at(8, 0))),
            (a.clone(), None),
        ]);

        assert_eq!(
            rows,
            vec![AggregatedRow::new(a, Some(at(8, 0))), AggregatedRow::new(b, None)]
        );
    }

    #[test]
    fn test_aggregate_skips_incomplete_hierarchy() {
        let schema = ColumnSchema {
            time_column: "Time".to_string(),
            time: 4,
            distance: 5,
            category: 8,
            company: 0,
            name: 1,
            account: 2,
            unit_id: 3,
        };
        let record = |account: Cell, time: &str| -> Row {
            vec![Cell::text("Acme"), Cell::text("Jo"), account, Cell::text("D1"), Cell::from(time)]
        };

        let aggregation = aggregate_earliest(
            &[
                record(Cell::text("A1"), "2024-01-01 09:00:00"),
                record(Cell::Empty, "2024-01-01 07:00:00"),
                record(Cell::text("A1"), "soon"),
            ],
            &schema,
        );

        assert_eq!(
            aggregation.rows,
            vec![AggregatedRow::new(HierarchyKey::new("Acme", "Jo", "A1", "D1"), Some(at(9, 0)))]
        );
        assert_eq!(aggregation.incomplete_hierarchy, 1);
        assert_eq!(aggregation.unparseable_time, 1);
    }

    #[test]
    fn test_time_display() {
        let key = HierarchyKey::new("Acme", "Jo", "A1", "D1");
        assert_eq!(AggregatedRow::new(key.clone(), Some(at(8, 5))).time_display(), "08:05:00");
        assert_eq!(AggregatedRow::new(key, None).time_display(), "-");
    }
}
