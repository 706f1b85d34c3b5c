//! Export encoders: download filenames and the xlsx workbook.
//!
//! The plain Markdown document is assembled and saved client-side from the
//! streamed text; the server only fixes its filename pattern. The tabular
//! export serializes extracted [`Row`]s into a single-sheet workbook.

use crate::extract::Row;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Fixed label prefixing both export filenames and naming the worksheet.
pub const EXPORT_LABEL: &str = "学习路径";

/// Column headers for the tabular export: section, item, note.
pub const COLUMN_HEADERS: [&str; 3] = ["模块/部分", "内容项", "备注"];

/// MIME type of the xlsx attachment.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Filename for the client-side Markdown download.
pub fn markdown_filename(profession: &str) -> String {
    format!("{EXPORT_LABEL}_{profession}.md")
}

/// Filename for the tabular export attachment.
pub fn excel_filename(profession: &str) -> String {
    format!("{EXPORT_LABEL}_{profession}.xlsx")
}

/// Serialize rows into xlsx bytes: one sheet, bold header row, one
/// spreadsheet row per [`Row`] in input order.
pub fn workbook_bytes(rows: &[Row]) -> Result<Vec<u8>, String> {
    let xe = |e: XlsxError| format!("failed to build workbook: {e}");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_LABEL).map_err(xe)?;

    let bold = Format::new().set_bold();
    for (col, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xe)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.section).map_err(xe)?;
        worksheet.write_string(r, 1, &row.item).map_err(xe)?;
        worksheet.write_string(r, 2, &row.note).map_err(xe)?;
    }

    workbook.save_to_buffer().map_err(xe)
}
