//! Pivot view construction.
//!
//! Mimics the tabular layout of a grouped spreadsheet pivot: rows are
//! sorted by hierarchy and a hierarchy label is blanked when it repeats
//! the row above, as long as every label to its left was blanked too.
//!
//! Example (sorted input → masked output):
//!
//! ```text
//! Acme | Jo  | A1 | D1      Acme | Jo  | A1 | D1
//! Acme | Jo  | A2 | D1  →        |     | A2 | D1
//! Acme | Ren | A2 | D2           | Ren | A2 | D2
//! ```
//!
//! The last row shows `A2` even though the row above has `A2`: once
//! `Name` diverged, everything to its right is shown.

use crate::aggregator::earliest_time::AggregatedRow;
use serde::Serialize;

/// A hierarchy cell of the pivot view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MaskedCell {
    Shown(String),
    Masked,
}

impl MaskedCell {
    /// Text to render; masked cells render empty
    pub fn display(&self) -> &str {
        match self {
            MaskedCell::Shown(value) => value,
            MaskedCell::Masked => "",
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, MaskedCell::Masked)
    }
}

/// One display row of the pivot view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskedRow {
    /// Company, name, account, unit id
    pub hierarchy: [MaskedCell; 4],

    /// Earliest time, never masked
    pub time: String,
}

/// Sort aggregated rows by `(company, name, account, unit_id)`
///
/// Levels compare as display text, so numeric ids order as strings
/// (`"10"` before `"9"`). Stable, so equal keys keep their relative order.
pub fn sort_aggregated(mut rows: Vec<AggregatedRow>) -> Vec<AggregatedRow> {
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    rows
}

/// Fold state: hierarchy values of the previous sorted row
#[derive(Debug, Default)]
struct MaskState {
    previous: Option<[String; 4]>,
}

impl MaskState {
    fn mask(&mut self, row: &AggregatedRow) -> MaskedRow {
        let current = row.key.levels().map(str::to_string);
        let mut is_parent_same = true;

        let hierarchy = std::array::from_fn(|level| {
            let repeats = self
                .previous
                .as_ref()
                .is_some_and(|prev| prev[level] == current[level]);

            if is_parent_same && repeats {
                MaskedCell::Masked
            } else {
                is_parent_same = false;
                MaskedCell::Shown(current[level].clone())
            }
        });

        self.previous = Some(current);

        MaskedRow {
            hierarchy,
            time: row.time_display(),
        }
    }
}

/// Build the masked display rows for an already sorted aggregate
///
/// **Public** - main entry point for pivot masking
///
/// Row `i` of the output describes row `i` of `sorted`.
pub fn build_pivot_view(sorted: &[AggregatedRow]) -> Vec<MaskedRow> {
    sorted
        .iter()
        .scan(MaskState::default(), |state, row| Some(state.mask(row)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::HierarchyKey;
    use pretty_assertions::assert_eq;

    fn row(company: &str, name: &str, account: &str, unit: &str) -> AggregatedRow {
        AggregatedRow::new(HierarchyKey::new(company, name, account, unit), None)
    }

    fn shown(rows: &[MaskedRow]) -> Vec<[&str; 4]> {
        rows.iter()
            .map(|r| std::array::from_fn(|i| r.hierarchy[i].display()))
            .collect()
    }

    #[test]
    fn test_numeric_ids_sort_as_text() {
        let sorted = sort_aggregated(vec![row("Acme", "Jo", "9", "D1"), row("Acme", "Jo", "10", "D2")]);
        let accounts: Vec<&str> = sorted.iter().map(|r| r.key.account.as_str()).collect();
        assert_eq!(accounts, vec!["10", "9"]);
    }

    #[test]
    fn test_first_row_fully_shown() {
        let view = build_pivot_view(&[row("Acme", "Jo", "A1", "D1")]);
        assert_eq!(shown(&view), vec![["Acme", "Jo", "A1", "D1"]]);
        assert_eq!(view[0].time, "-");
    }

    #[test]
    fn test_prefix_masking_stops_at_first_divergence() {
        let sorted = sort_aggregated(vec![
            row("Acme", "Ren", "A2", "D2"),
            row("Acme", "Jo", "A1", "D1"),
            row("Acme", "Jo", "A2", "D1"),
        ]);

        let view = build_pivot_view(&sorted);
        assert_eq!(
            shown(&view),
            vec![
                ["Acme", "Jo", "A1", "D1"],
                ["", "", "A2", "D1"],
                ["", "Ren", "A2", "D2"],
            ]
        );
    }

    #[test]
    fn test_compares_with_literal_previous_row() {
        let sorted = vec![
            row("Acme", "Jo", "A1", "D1"),
            row("Acme", "Jo", "A1", "D2"),
            row("Acme", "Jo", "A1", "D3"),
        ];

        let view = build_pivot_view(&sorted);
        assert!(view[2].hierarchy[0].is_masked());
        assert!(view[2].hierarchy[2].is_masked());
        assert_eq!(view[2].hierarchy[3], MaskedCell::Shown("D3".to_string()));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut first = row("Acme", "Jo", "A1", "D1");
        first.earliest = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0);
        let second = row("Acme", "Jo", "A1", "D1");

        let sorted = sort_aggregated(vec![first.clone(), second.clone()]);
        assert_eq!(sorted, vec![first, second]);
    }
}
