//! FILENAME: persistence/src/csv_writer.rs

use crate::{ExportOptions, PersistenceError};
use csv::WriterBuilder;
use engine::SummaryRow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the summary as delimited text: one header row, then one row per
/// object with the total rendered in the export's locale convention.
pub fn write_summary_csv<W: Write>(
    writer: W,
    rows: &[SummaryRow],
    options: &ExportOptions,
) -> Result<(), PersistenceError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    wtr.write_record([options.key_label.as_str(), options.total_label.as_str()])?;

    for row in rows {
        let total = options.number_format.format(row.total);
        wtr.write_record([row.object_id.as_str(), total.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// The export as an in-memory UTF-8 blob.
pub fn summary_csv_bytes(rows: &[SummaryRow], options: &ExportOptions) -> Result<Vec<u8>, PersistenceError> {
    let mut buffer = Vec::new();
    write_summary_csv(&mut buffer, rows, options)?;
    Ok(buffer)
}

pub fn save_summary_csv(rows: &[SummaryRow], options: &ExportOptions, path: &Path) -> Result<(), PersistenceError> {
    let file = File::create(path)?;
    write_summary_csv(file, rows, options)?;
    log::info!("CSV file exported to: {}", path.display());
    Ok(())
}
