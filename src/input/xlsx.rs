//! Workbook loading with calamine.
//!
//! Every sheet is read; the first row of each sheet becomes its header.
//! Header labels get the same treatment a dataframe reader gives them:
//! blank labels become `Unnamed: {index}` and repeated labels get `.1`,
//! `.2`, ... suffixes.

use crate::parser::table::{Cell, Row, SourceWorkbook, Table};
use crate::parser::values::parse_timestamp_text;
use crate::utils::error::InputError;
use calamine::{open_workbook, open_workbook_from_rs, Data, Reader, Xlsx};
use log::{debug, info};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Load every sheet of an `.xlsx` file
///
/// # Errors
/// * `InputError::ReadFailed` - the file is not a readable workbook
/// * `InputError::InvalidFormat` - the workbook has no sheets
pub fn load_workbook(path: impl AsRef<Path>) -> Result<SourceWorkbook, InputError> {
    let path = path.as_ref();
    info!("Reading workbook: {}", path.display());

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    read_sheets(&mut workbook)
}

/// Load every sheet of an in-memory `.xlsx` buffer
pub fn load_workbook_from_bytes(bytes: &[u8]) -> Result<SourceWorkbook, InputError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    read_sheets(&mut workbook)
}

fn read_sheets<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<SourceWorkbook, InputError> {
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(InputError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name)?;

        // Column positions count from column A, not from the first used column
        let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let mut rows = range.rows().map(|r| pad_row(r, leading));
        let headers = rows.next().map(|h| header_labels(&h)).unwrap_or_default();
        let data: Vec<Row> = rows.collect();

        debug!(
            "Sheet '{}': {} columns, {} rows",
            sheet_name,
            headers.len(),
            data.len()
        );

        sheets.push(Table::new(sheet_name.clone(), headers, data));
    }

    Ok(SourceWorkbook::new(sheets))
}

/// Convert a sheet row, prefixed with `leading` blank cells
fn pad_row(cells: &[Data], leading: usize) -> Row {
    std::iter::repeat(Cell::Empty)
        .take(leading)
        .chain(cells.iter().map(convert_cell))
        .collect()
}

/// Convert a calamine cell into the engine's cell model
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(value),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_timestamp_text(s) {
            Some(value) => Cell::DateTime(value),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Stringify header cells, naming blanks and disambiguating repeats
pub fn header_labels(cells: &[Cell]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let label = if cell.is_blank() {
                format!("Unnamed: {}", index)
            } else {
                cell.to_string()
            };

            let count = seen.entry(label.clone()).or_insert(0);
            let unique = if *count == 0 {
                label
            } else {
                format!("{}.{}", label, count)
            };
            *count += 1;
            unique
        })
        .collect()
}
