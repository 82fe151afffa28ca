//! FILENAME: engine/src/cell.rs
//! PURPOSE: Defines the value a single spreadsheet cell carries into the pipeline.
//! CONTEXT: The loader copies cells out of the workbook into `CellValue` without
//! interpreting them. Interpretation (numeric coercion, key rendering) happens
//! later so that a malformed cell never fails the load.

use serde::{Deserialize, Serialize};

/// Represents the raw data within a cell, as read from the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// An error cell (#DIV/0!, #N/A, ...) or a value the loader cannot
    /// represent, such as a date. Holds the source rendering.
    Error(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for empty cells and zero-length text. Whitespace is content.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the display value of the cell as a String.
    /// Used to turn a grouping cell into a key: integral numbers are shown
    /// without a fractional part so that `1234.0` groups as `"1234"`.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}
