//! FILENAME: persistence/src/lib.rs
//! kWh Summary Persistence Module
//!
//! Reads the consumption sheet out of an uploaded XLSX workbook and writes
//! the per-object summary back out as a delimited file or an XLSX sheet.

mod csv_reader;
mod csv_writer;
mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_reader::{read_summary_csv, read_summary_csv_from_path};
pub use csv_writer::{save_summary_csv, summary_csv_bytes, write_summary_csv};
pub use error::PersistenceError;
pub use xlsx_reader::{load_sheet, load_sheet_from_path, sheet_names};
pub use xlsx_writer::{save_summary_xlsx, summary_xlsx_bytes};

use engine::{LocaleNumberFormat, RawRecord};
use serde::{Deserialize, Serialize};

// ============================================================================
// SOURCE LAYOUT DEFAULTS
// ============================================================================

/// Sheet that must be present in every uploaded workbook.
pub const DEFAULT_SHEET_NAME: &str = "duomenys_analizei";

/// Header of the object identifier column.
pub const DEFAULT_KEY_COLUMN: &str = "Obj. Nr.";

/// Header of the consumption delta column.
pub const DEFAULT_VALUE_COLUMN: &str = "Skirtumas";

/// File name offered for the delimited export.
pub const EXPORT_FILE_NAME: &str = "obj_nr_kWh_consumption_all_rows.csv";

/// File name offered for the XLSX export.
pub const XLSX_EXPORT_FILE_NAME: &str = "obj_nr_kWh_consumption_all_rows.xlsx";

/// Field delimiter of the delimited export.
pub const CSV_DELIMITER: u8 = b';';

// ============================================================================
// SHEET LAYOUT
// ============================================================================

/// Where the loader finds its data: a sheet and two columns located by header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub key_column: String,
    pub value_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
        }
    }
}

// ============================================================================
// LOADED SHEET
// ============================================================================

/// Counters collected while reading the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data rows below the header, including skipped ones.
    pub rows_read: usize,
    /// Rows dropped because the key cell was empty.
    pub skipped_blank_key: usize,
}

/// The records of one sheet, in sheet order.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub sheet_name: String,
    pub records: Vec<RawRecord>,
    pub stats: LoadStats,
}

// ============================================================================
// EXPORT OPTIONS
// ============================================================================

/// Column headers and number convention used by every summary export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub key_label: String,
    pub total_label: String,
    pub delimiter: u8,
    pub number_format: LocaleNumberFormat,
}

impl ExportOptions {
    pub fn new(key_label: impl Into<String>, total_label: impl Into<String>) -> Self {
        Self {
            key_label: key_label.into(),
            total_label: total_label.into(),
            ..Self::default()
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            key_label: DEFAULT_KEY_COLUMN.to_string(),
            total_label: "kWh_suvartota".to_string(),
            delimiter: CSV_DELIMITER,
            number_format: LocaleNumberFormat::LITHUANIAN,
        }
    }
}
