//! FILENAME: tests/common/mod.rs
//! Workbook fixtures for kWh summary integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

/// One cell of a fixture row.
#[derive(Debug, Clone)]
pub enum Value {
    Num(f64),
    Text(String),
    Blank,
}

impl Value {
    pub fn text(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Builds XLSX workbooks in memory, sheet by sheet.
pub struct WorkbookFixture {
    workbook: Workbook,
}

impl WorkbookFixture {
    pub fn new() -> Self {
        WorkbookFixture {
            workbook: Workbook::new(),
        }
    }

    /// Adds a sheet with a header row and data rows.
    pub fn sheet(mut self, name: &str, headers: &[&str], rows: &[Vec<Value>]) -> Self {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(name).unwrap();

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }

        for (r, row) in rows.iter().enumerate() {
            let row_idx = (r + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                match value {
                    Value::Num(n) => {
                        worksheet.write_number(row_idx, col as u16, *n).unwrap();
                    }
                    Value::Text(s) => {
                        worksheet.write_string(row_idx, col as u16, s).unwrap();
                    }
                    Value::Blank => {}
                }
            }
        }

        self
    }

    /// Adds the consumption sheet with the standard two columns.
    pub fn readings(self, rows: &[(&str, Value)]) -> Self {
        let rows: Vec<Vec<Value>> = rows
            .iter()
            .map(|(id, delta)| vec![Value::text(id), delta.clone()])
            .collect();
        self.sheet(ReadingsFixture::SHEET, &ReadingsFixture::headers(), &rows)
    }

    pub fn bytes(mut self) -> Vec<u8> {
        self.workbook.save_to_buffer().unwrap()
    }
}

/// The consumption sheet layout the upload form expects.
pub struct ReadingsFixture;

impl ReadingsFixture {
    pub const SHEET: &'static str = "duomenys_analizei";

    pub fn headers() -> Vec<&'static str> {
        vec!["Obj. Nr.", "Skirtumas"]
    }

    /// The four-row scenario: A=100, B="abc", A=50, B=200.
    pub fn scenario() -> Vec<u8> {
        WorkbookFixture::new()
            .readings(&[
                ("A", Value::Num(100.0)),
                ("B", Value::text("abc")),
                ("A", Value::Num(50.0)),
                ("B", Value::Num(200.0)),
            ])
            .bytes()
    }

    /// Twelve meters with distinct totals, plus a realistic extra column.
    pub fn twelve_meters() -> Vec<u8> {
        let mut rows = Vec::new();
        for i in 0..12u32 {
            let id = format!("LT-{:03}", i + 1);
            rows.push(vec![Value::text("2024-03"), Value::text(&id), Value::Num(100.0 * (i + 1) as f64)]);
            rows.push(vec![Value::text("2024-04"), Value::text(&id), Value::Num(0.25)]);
        }
        WorkbookFixture::new()
            .sheet("Santrauka", &["Pastabos"], &[])
            .sheet(Self::SHEET, &["Mėnuo", "Obj. Nr.", "Skirtumas"], &rows)
            .bytes()
    }
}
