//! Duplicate leaf detection.
//!
//! A unit id is a duplicate when it appears on more than one aggregated
//! row of the category, anywhere in the set. Adjacency and masking play
//! no part.

use crate::aggregator::earliest_time::AggregatedRow;
use std::collections::HashMap;

/// Flag every row whose `unit_id` occurs more than once
///
/// The result is index-aligned with `rows`.
pub fn detect_duplicate_leaves(rows: &[AggregatedRow]) -> Vec<bool> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.key.unit_id.as_str()).or_insert(0) += 1;
    }

    rows.iter()
        .map(|row| counts.get(row.key.unit_id.as_str()).copied().unwrap_or(0) > 1)
        .collect()
}
