//! FILENAME: persistence/src/xlsx_writer.rs

use crate::{ExportOptions, PersistenceError};
use engine::SummaryRow;
use rust_xlsxwriter::{Format, FormatAlign, Workbook as XlsxWorkbook};
use std::path::Path;

/// Excel number format for totals. Excel renders the grouping and decimal
/// characters in the reader's own locale.
const TOTAL_NUMBER_FORMAT: &str = "#,##0.00";

/// Excel caps sheet names at 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

fn build_workbook(rows: &[SummaryRow], options: &ExportOptions) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();

    let sheet_name: String = options.total_label.chars().take(MAX_SHEET_NAME_LEN).collect();
    worksheet.set_name(&sheet_name)?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let total_format = Format::new().set_num_format(TOTAL_NUMBER_FORMAT);

    worksheet.write_string_with_format(0, 0, &options.key_label, &header_format)?;
    worksheet.write_string_with_format(0, 1, &options.total_label, &header_format)?;

    for (i, row) in rows.iter().enumerate() {
        let row_idx = (i + 1) as u32;
        worksheet.write_string(row_idx, 0, &row.object_id)?;
        worksheet.write_number_with_format(row_idx, 1, row.total, &total_format)?;
    }

    // Excel uses character width
    let key_width = rows
        .iter()
        .map(|row| row.object_id.chars().count())
        .chain(std::iter::once(options.key_label.chars().count()))
        .max()
        .unwrap_or(10);
    worksheet.set_column_width(0, (key_width + 2) as f64)?;
    worksheet.set_column_width(1, 18.0)?;

    Ok(xlsx)
}

/// The summary as a one-sheet XLSX workbook with numeric totals.
pub fn summary_xlsx_bytes(rows: &[SummaryRow], options: &ExportOptions) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_workbook(rows, options)?;
    Ok(xlsx.save_to_buffer()?)
}

pub fn save_summary_xlsx(rows: &[SummaryRow], options: &ExportOptions, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = build_workbook(rows, options)?;
    xlsx.save(path)?;
    log::info!("XLSX file exported to: {}", path.display());
    Ok(())
}
