//! In-memory table abstraction the engine consumes.
//!
//! A `Table` is one sheet: a header row plus typed data rows. Column
//! identity is positional; header labels are only used after
//! normalization (see `parser::schema`).

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: Cell = Cell::Empty;

/// One data row
pub type Row = Vec<Cell>;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Stringified form used for matching, grouping, sorting and display.
///
/// Integral numbers drop the fractional part so identifiers stored as
/// numbers (`12345.0`) compare equal to their textual form.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

/// A named sheet with a header row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Sheet name
    pub name: String,

    /// Header labels as read (not yet trimmed)
    pub headers: Vec<String>,

    /// Data rows, header excluded
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header labels trimmed of surrounding whitespace
    pub fn normalized_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| h.trim().to_string()).collect()
    }

    /// Position of the first column whose normalized label equals `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Cell at (`row`, `col`); short rows read as blank
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// Cell `col` of a row; short rows read as blank
pub fn row_cell(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

/// Every sheet of an uploaded workbook, in sheet order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceWorkbook {
    pub sheets: Vec<Table>,
}

impl SourceWorkbook {
    pub fn new(sheets: Vec<Table>) -> Self {
        Self { sheets }
    }

    /// Sheet lookup by exact name
    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
