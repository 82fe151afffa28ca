//! FILENAME: persistence/src/csv_reader.rs
//! Reads a summary export back into rows.

use crate::{ExportOptions, PersistenceError};
use csv::ReaderBuilder;
use engine::SummaryRow;
use std::io::Read;
use std::path::Path;

/// Parses a delimited summary export. The header row is checked against
/// `options` and every total must be written in the export's number convention.
pub fn read_summary_csv<R: Read>(reader: R, options: &ExportOptions) -> Result<Vec<SummaryRow>, PersistenceError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.get(0) != Some(options.key_label.as_str())
        || headers.get(1) != Some(options.total_label.as_str())
    {
        return Err(PersistenceError::InvalidFormat(format!(
            "expected header '{}{}{}', found '{}'",
            options.key_label,
            options.delimiter as char,
            options.total_label,
            headers.iter().collect::<Vec<_>>().join(&(options.delimiter as char).to_string())
        )));
    }

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let object_id = record.get(0).unwrap_or_default();
        let raw_total = record.get(1).unwrap_or_default();

        let total = options.number_format.parse(raw_total).ok_or_else(|| {
            PersistenceError::InvalidFormat(format!(
                "row {}: '{}' is not a number",
                line + 2,
                raw_total
            ))
        })?;

        rows.push(SummaryRow::new(object_id, total));
    }

    Ok(rows)
}

pub fn read_summary_csv_from_path(path: &Path, options: &ExportOptions) -> Result<Vec<SummaryRow>, PersistenceError> {
    let file = std::fs::File::open(path)?;
    read_summary_csv(file, options)
}
