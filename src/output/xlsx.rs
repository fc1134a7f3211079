//! Spreadsheet output writer.
//!
//! Renders the source sheets and the per-category report into one
//! workbook with rust_xlsxwriter. The whole workbook is rendered into
//! memory first; the output file is only touched once rendering succeeded.

use super::validate_path;
use crate::parser::table::{Cell, SourceWorkbook, Table};
use crate::pivot::{PivotRow, StyleTag};
use crate::report::{CategoryReport, Report};
use crate::utils::config::{
    DATETIME_NUM_FORMAT, DUPLICATE_FILL, GRAND_TOTAL_LABEL, HEADER_FILL, PIVOT_COLUMN_WIDTHS,
    PIVOT_HEADER_ROW, SUMMARY_COMPANY_COL, SUMMARY_COMPANY_WIDTH, SUMMARY_COUNT_COL,
    SUMMARY_COUNT_HEADER, SUMMARY_COUNT_WIDTH,
};
use crate::utils::error::OutputError;
use chrono::NaiveDateTime;
use log::{debug, info};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// Layout of the pivot sheets
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Row of the pivot header; data starts on the next row
    pub pivot_header_row: u32,
    pub pivot_column_widths: [f64; 5],
    pub summary_company_col: u16,
    pub summary_count_col: u16,
    pub duplicate_fill: u32,
    pub header_fill: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pivot_header_row: PIVOT_HEADER_ROW,
            pivot_column_widths: PIVOT_COLUMN_WIDTHS,
            summary_company_col: SUMMARY_COMPANY_COL,
            summary_count_col: SUMMARY_COUNT_COL,
            duplicate_fill: DUPLICATE_FILL,
            header_fill: HEADER_FILL,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_fill(mut self, rgb: u32) -> Self {
        self.duplicate_fill = rgb;
        self
    }

    pub fn with_header_fill(mut self, rgb: u32) -> Self {
        self.header_fill = rgb;
        self
    }
}

/// Reusable cell formats
struct ReportFormats {
    header: Format,
    data_header: Format,
    datetime: Format,
    standard: Format,
    standard_boundary: Format,
    bold: Format,
    bold_boundary: Format,
    duplicate: Format,
    duplicate_boundary: Format,
}

impl ReportFormats {
    fn new(layout: &LayoutConfig) -> Self {
        let base = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap();
        let boundary = base.clone().set_border_top(FormatBorder::Medium);

        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(layout.header_fill)
            .set_border(FormatBorder::Thin);

        let data_header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        Self {
            header,
            data_header,
            datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
            bold: base.clone().set_bold(),
            bold_boundary: boundary.clone().set_bold(),
            duplicate: base
                .clone()
                .set_background_color(layout.duplicate_fill)
                .set_font_color(Color::Black),
            duplicate_boundary: boundary
                .clone()
                .set_background_color(layout.duplicate_fill)
                .set_font_color(Color::Black),
            standard: base,
            standard_boundary: boundary,
        }
    }

    /// Format for a tagged pivot cell
    fn for_tags(&self, tags: &[StyleTag]) -> &Format {
        let boundary = tags.contains(&StyleTag::SubconBoundary);
        let bold = tags.contains(&StyleTag::Bold);
        let duplicate = tags.contains(&StyleTag::DuplicateHighlight);

        match (boundary, bold, duplicate) {
            (true, true, _) => &self.bold_boundary,
            (true, false, true) => &self.duplicate_boundary,
            (true, false, false) => &self.standard_boundary,
            (false, true, _) => &self.bold,
            (false, false, true) => &self.duplicate,
            (false, false, false) => &self.standard,
        }
    }
}

/// Render the complete output workbook into memory
///
/// **Public** - main entry point for spreadsheet output
///
/// Sheet order: the source sheets as read, then `Data {C}` and
/// `Pivot {C}` for each category of the report.
pub fn render_workbook(
    source: &SourceWorkbook,
    report: &Report,
    layout: &LayoutConfig,
) -> Result<Vec<u8>, OutputError> {
    let formats = ReportFormats::new(layout);
    let mut workbook = Workbook::new();

    for sheet in &source.sheets {
        debug!("Copying source sheet '{}'", sheet.name);
        let worksheet = workbook.add_worksheet();
        write_table(worksheet, sheet, &sheet.name, &formats)?;
    }

    for category in &report.categories {
        let worksheet = workbook.add_worksheet();
        write_table(worksheet, &category.data, &category.data_sheet_name(), &formats)?;

        let worksheet = workbook.add_worksheet();
        write_pivot_sheet(worksheet, category, layout, &formats)?;
    }

    let buffer = workbook.save_to_buffer()?;
    debug!("Rendered workbook ({} bytes)", buffer.len());

    Ok(buffer)
}

/// Render and write the output workbook
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or parent cannot be created
/// * `OutputError::RenderFailed` - rust_xlsxwriter rejected the content
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_workbook(
    source: &SourceWorkbook,
    report: &Report,
    layout: &LayoutConfig,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;

    let buffer = render_workbook(source, report, layout)?;

    super::create_parent_dirs(output_path)?;
    std::fs::write(output_path, &buffer)?;

    info!(
        "Workbook written to {} ({:.2} KB)",
        output_path.display(),
        buffer.len() as f64 / 1024.0
    );

    Ok(())
}

/// Header row plus typed data rows
fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    sheet_name: &str,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    worksheet.set_name(sheet_name)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &formats.data_header)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let excel_row = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, excel_row, col as u16, cell, formats)?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::DateTime(dt) => {
            worksheet.write_number_with_format(row, col, excel_serial(dt), &formats.datetime)?;
        }
    }
    Ok(())
}

/// Spreadsheet serial date (days since 1899-12-30)
fn excel_serial(dt: &NaiveDateTime) -> f64 {
    const UNIX_EPOCH_SERIAL: f64 = 25_569.0;
    const MILLIS_PER_DAY: f64 = 86_400_000.0;
    UNIX_EPOCH_SERIAL + dt.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Row positions of one pivot sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PivotGeometry {
    header_row: u32,
    /// First scrolling row; everything above stays frozen
    freeze_row: u32,
    /// Last row covered by the autofilter
    filter_last_row: u32,
    grand_total_row: u32,
}

impl PivotGeometry {
    fn new(header_row: u32, pivot_rows: usize, summary_rows: usize) -> Self {
        Self {
            header_row,
            freeze_row: header_row + 1,
            filter_last_row: header_row + pivot_rows as u32,
            // an empty summary still leaves its first row blank
            grand_total_row: header_row + 1 + summary_rows.max(1) as u32,
        }
    }
}

/// Pivot table, summary table, panes and filter of one category
fn write_pivot_sheet(
    worksheet: &mut Worksheet,
    category: &CategoryReport,
    layout: &LayoutConfig,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    worksheet.set_name(category.pivot_sheet_name())?;

    let geometry = PivotGeometry::new(
        layout.pivot_header_row,
        category.pivot.len(),
        category.summary.rows.len(),
    );
    let header_row = geometry.header_row;
    let last_col = category.pivot_columns.len().saturating_sub(1) as u16;

    worksheet.set_freeze_panes(geometry.freeze_row, 0)?;
    worksheet.autofilter(header_row, 0, geometry.filter_last_row, last_col)?;

    for (col, header) in category.pivot_columns.iter().enumerate() {
        worksheet.write_string_with_format(header_row, col as u16, header.as_str(), &formats.header)?;
    }

    for (index, row) in category.pivot.iter().enumerate() {
        write_pivot_row(worksheet, header_row + 1 + index as u32, row, formats)?;
    }

    for (col, width) in layout.pivot_column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    write_summary(worksheet, category, layout, &geometry, formats)?;

    debug!(
        "Pivot sheet '{}': {} rows, {} summary rows",
        category.pivot_sheet_name(),
        category.pivot.len(),
        category.summary.rows.len()
    );

    Ok(())
}

fn write_pivot_row(
    worksheet: &mut Worksheet,
    excel_row: u32,
    row: &PivotRow,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    for (col, cell) in row.cells.iter().enumerate() {
        let format = formats.for_tags(&cell.tags);
        if cell.value.is_empty() {
            worksheet.write_blank(excel_row, col as u16, format)?;
        } else {
            worksheet.write_string_with_format(excel_row, col as u16, cell.value.as_str(), format)?;
        }
    }
    Ok(())
}

/// Summary table beside the pivot, independent of the pivot's length
fn write_summary(
    worksheet: &mut Worksheet,
    category: &CategoryReport,
    layout: &LayoutConfig,
    geometry: &PivotGeometry,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    let header_row = geometry.header_row;
    let company_col = layout.summary_company_col;
    let count_col = layout.summary_count_col;

    worksheet.write_string_with_format(header_row, company_col, "Company", &formats.header)?;
    worksheet.write_string_with_format(header_row, count_col, SUMMARY_COUNT_HEADER, &formats.header)?;

    for (index, summary_row) in category.summary.rows.iter().enumerate() {
        let row = header_row + 1 + index as u32;
        worksheet.write_string_with_format(row, company_col, summary_row.company.as_str(), &formats.standard)?;
        worksheet.write_number_with_format(row, count_col, summary_row.distinct_names as f64, &formats.standard)?;
    }

    let total_row = geometry.grand_total_row;
    worksheet.write_string_with_format(total_row, company_col, GRAND_TOTAL_LABEL, &formats.header)?;
    worksheet.write_number_with_format(
        total_row,
        count_col,
        category.summary.grand_total as f64,
        &formats.header,
    )?;

    worksheet.set_column_width(company_col, SUMMARY_COMPANY_WIDTH)?;
    worksheet.set_column_width(count_col, SUMMARY_COUNT_WIDTH)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_excel_serial() {
        let dt = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(excel_serial(&dt), 25_569.5);
    }

    fn base() -> Format {
        Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap()
    }

    #[test]
    fn test_tags_map_to_formats() {
        let formats = ReportFormats::new(&LayoutConfig::default());
        let heavy_top = base().set_border_top(FormatBorder::Medium);

        assert_eq!(formats.for_tags(&[]), &base());
        assert_eq!(formats.for_tags(&[StyleTag::Bold]), &base().set_bold());
        assert_eq!(
            formats.for_tags(&[StyleTag::DuplicateHighlight]),
            &base().set_background_color(0xFFC000).set_font_color(Color::Black)
        );
        assert_eq!(formats.for_tags(&[StyleTag::SubconBoundary]), &heavy_top);
        assert_eq!(
            formats.for_tags(&[StyleTag::SubconBoundary, StyleTag::Bold]),
            &heavy_top.clone().set_bold()
        );
        assert_eq!(
            formats.for_tags(&[StyleTag::SubconBoundary, StyleTag::DuplicateHighlight]),
            &heavy_top.set_background_color(0xFFC000).set_font_color(Color::Black)
        );
    }

    #[test]
    fn test_duplicate_fill_follows_layout() {
        let formats = ReportFormats::new(&LayoutConfig::new().with_duplicate_fill(0xFF0000));
        assert_eq!(
            formats.for_tags(&[StyleTag::DuplicateHighlight]),
            &base().set_background_color(0xFF0000).set_font_color(Color::Black)
        );
    }

    #[test]
    fn test_pivot_geometry() {
        let geometry = PivotGeometry::new(2, 3, 2);
        assert_eq!(geometry.freeze_row, 3);
        assert_eq!(geometry.filter_last_row, 5);
        assert_eq!(geometry.grand_total_row, 5);
    }

    #[test]
    fn test_grand_total_skips_a_row_without_companies() {
        let geometry = PivotGeometry::new(2, 0, 0);
        assert_eq!(geometry.filter_last_row, 2);
        assert_eq!(geometry.grand_total_row, 4);
    }

    #[test]
    fn test_layout_builder() {
        let layout = LayoutConfig::new().with_duplicate_fill(0xFF0000);
        assert_eq!(layout.duplicate_fill, 0xFF0000);
        assert_eq!(layout.pivot_header_row, 2);
        assert_eq!(layout.summary_company_col, 6);
    }
}
