use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{get_headers, record_to_row};
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Status column, coloured like the terminal table.
const STATUS_COL: usize = 9;

/// One styled sheet: banded rows, frozen header, date cells, auto widths.
pub(crate) fn export_xlsx(rows: &[RecordExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_export_error)?;

    let title_format = Format::new().set_bold().set_font_size(13);
    worksheet
        .write_with_format(0, 0, title, &title_format)
        .map_err(to_export_error)?;

    let headers = get_headers();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(2, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(3, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, rec) in rows.iter().enumerate() {
        let row = (row_index + 3) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in record_to_row(rec).iter().enumerate() {
            let font = if col == STATUS_COL {
                status_color(value)
            } else {
                Color::Black
            };
            write_xlsx_cell(worksheet, row, col as u16, value, band_color, font)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", rows.len(), path);
    Ok(())
}

fn status_color(label: &str) -> Color {
    match label {
        "Present" => Color::RGB(0x2E7D32),
        "Absent" => Color::RGB(0xC62828),
        "Late" => Color::RGB(0xEF6C00),
        "On Leave" => Color::RGB(0x1565C0),
        _ => Color::Black,
    }
}

/// Write a cell as a date, a number or plain text, whichever fits.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    font: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_font_color(font)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = base.set_num_format(num_format);
        worksheet
            .write_with_format(row, col, serial, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        let fmt = base.set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(to_export_error)?;
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
