//! Style tags for pivot cells.
//!
//! Tags are data. The spreadsheet renderer maps them to formats, the text
//! renderer ignores them, and the JSON report carries them as-is.

use super::view::MaskedRow;
use serde::Serialize;

/// Formatting rule attached to a pivot cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    /// Row starts a new company group: heavier top border
    SubconBoundary,
    /// Non-empty company label
    Bold,
    /// Unit id occurs more than once in the category
    DuplicateHighlight,
}

/// A rendered pivot cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotCell {
    pub value: String,
    pub tags: Vec<StyleTag>,
}

impl PivotCell {
    pub fn has_tag(&self, tag: StyleTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// A fully tagged pivot row: company, name, account, unit id, time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    pub cells: Vec<PivotCell>,
    pub group_start: bool,
    pub duplicate_leaf: bool,
}

impl PivotRow {
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.value.as_str()).collect()
    }
}

const COMPANY: usize = 0;
const UNIT_ID: usize = 3;

/// Attach style tags to masked rows
///
/// **Public** - last stage of pivot construction
///
/// # Arguments
/// * `masked` - Output of `build_pivot_view`
/// * `duplicates` - Output of `detect_duplicate_leaves`, same length
pub fn tag_rows(masked: &[MaskedRow], duplicates: &[bool]) -> Vec<PivotRow> {
    masked
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let duplicate_leaf = duplicates.get(index).copied().unwrap_or(false);
            let group_start = index > 0 && !row.hierarchy[COMPANY].display().is_empty();

            let values = row
                .hierarchy
                .iter()
                .map(|cell| cell.display().to_string())
                .chain(std::iter::once(row.time.clone()));

            let cells = values
                .enumerate()
                .map(|(col, value)| {
                    let mut tags = Vec::new();
                    if group_start {
                        tags.push(StyleTag::SubconBoundary);
                    }
                    if col == COMPANY && !value.is_empty() {
                        tags.push(StyleTag::Bold);
                    } else if col == UNIT_ID && duplicate_leaf {
                        tags.push(StyleTag::DuplicateHighlight);
                    }
                    PivotCell { value, tags }
                })
                .collect();

            PivotRow {
                cells,
                group_start,
                duplicate_leaf,
            }
        })
        .collect()
}
