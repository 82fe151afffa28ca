//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the consumption data model.
//! CONTEXT: Re-exports the row types, numeric coercion and locale number
//! formatting shared by the summary engine, persistence and the app.

pub mod cell;
pub mod coerce;
pub mod number_format;
pub mod record;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use coerce::{coerce_column, coerce_numeric, count_missing};
pub use number_format::{format_locale, parse_locale, LocaleNumberFormat};
pub use record::{RawRecord, SummaryRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_coerces_record_deltas() {
        let numeric = RawRecord::new("A", 100.0);
        let text = RawRecord::new("B", "abc");
        assert_eq!(numeric.numeric_delta(), Some(100.0));
        assert_eq!(text.numeric_delta(), None);
    }

    #[test]
    fn it_serializes_summary_rows() {
        let row = SummaryRow::new("Obj-1", 1234.5);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"object_id":"Obj-1","total":1234.5}"#);
        let back: SummaryRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
