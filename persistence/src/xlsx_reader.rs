// FILENAME: persistence/src/xlsx_reader.rs

use crate::{LoadStats, LoadedSheet, PersistenceError, SheetLayout};
use calamine::{Data, Range, Reader, Xlsx};
use engine::{CellValue, RawRecord};
use std::io::Cursor;
use std::path::Path;

fn open_workbook(bytes: &[u8]) -> Result<Xlsx<Cursor<&[u8]>>, PersistenceError> {
    Ok(Xlsx::new(Cursor::new(bytes))?)
}

/// Lists the sheet names of an XLSX workbook without reading any cells.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>, PersistenceError> {
    let workbook = open_workbook(bytes)?;
    Ok(workbook.sheet_names().to_vec())
}

pub fn load_sheet_from_path(path: &Path, layout: &SheetLayout) -> Result<LoadedSheet, PersistenceError> {
    let bytes = std::fs::read(path)?;
    load_sheet(&bytes, layout)
}

/// Reads `layout.sheet_name` out of an XLSX workbook.
///
/// The first row of the sheet's used range is the header row. Rows whose key
/// cell is empty are skipped; every other row becomes one `RawRecord` with
/// the delta cell left uninterpreted.
pub fn load_sheet(bytes: &[u8], layout: &SheetLayout) -> Result<LoadedSheet, PersistenceError> {
    let mut workbook = open_workbook(bytes)?;
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    if !sheet_names.iter().any(|name| name == &layout.sheet_name) {
        return Err(PersistenceError::SheetNotFound {
            requested: layout.sheet_name.clone(),
            available: sheet_names,
        });
    }

    let range = workbook.worksheet_range(&layout.sheet_name)?;
    let (records, stats) = read_records(&range, layout)?;

    log::debug!(
        "Loaded sheet '{}': {} rows read, {} skipped for an empty key",
        layout.sheet_name,
        stats.rows_read,
        stats.skipped_blank_key
    );

    Ok(LoadedSheet {
        sheet_name: layout.sheet_name.clone(),
        records,
        stats,
    })
}

fn read_records(
    range: &Range<Data>,
    layout: &SheetLayout,
) -> Result<(Vec<RawRecord>, LoadStats), PersistenceError> {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell_value(cell).display_value().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let key_idx = find_column(&headers, &layout.key_column, layout)?;
    let value_idx = find_column(&headers, &layout.value_column, layout)?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for row in rows {
        stats.rows_read += 1;

        let key = row.get(key_idx).map(cell_value).unwrap_or_default();
        if key.is_blank() {
            stats.skipped_blank_key += 1;
            continue;
        }

        let delta = row.get(value_idx).map(cell_value).unwrap_or_default();
        records.push(RawRecord {
            object_id: key.display_value(),
            delta,
        });
    }

    if stats.skipped_blank_key > 0 {
        log::warn!(
            "Skipped {} row(s) in '{}' with an empty '{}' cell",
            stats.skipped_blank_key,
            layout.sheet_name,
            layout.key_column
        );
    }

    Ok((records, stats))
}

fn find_column(headers: &[String], column: &str, layout: &SheetLayout) -> Result<usize, PersistenceError> {
    headers
        .iter()
        .position(|header| header == column.trim())
        .ok_or_else(|| PersistenceError::MissingColumn {
            column: column.to_string(),
            sheet: layout.sheet_name.clone(),
            found: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
        })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::DateTime(dt) => CellValue::Error(dt.as_f64().to_string()),
        Data::DateTimeIso(s) => CellValue::Error(s.clone()),
        Data::DurationIso(s) => CellValue::Error(s.clone()),
    }
}
