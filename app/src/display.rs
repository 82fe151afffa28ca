//! FILENAME: app/src/display.rs
// PURPOSE: The on-screen results table: object id and locale-formatted total.

use std::fmt;

use engine::LocaleNumberFormat;
use serde::{Deserialize, Serialize};
use summary_engine::Summary;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub object_id: String,
    pub total: String,
}

/// Summary rows in sort order with totals already formatted for reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub key_header: String,
    pub total_header: String,
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    pub fn from_summary(summary: &Summary, number_format: &LocaleNumberFormat) -> Self {
        DisplayTable {
            key_header: summary.definition.key_label.clone(),
            total_header: summary.definition.total_label.clone(),
            rows: summary
                .rows
                .iter()
                .map(|row| DisplayRow {
                    object_id: row.object_id.clone(),
                    total: number_format.format(row.total),
                })
                .collect(),
        }
    }

    /// Renders an aligned text table: ids left-aligned, totals right-aligned.
    /// Widths are terminal columns, so wide and combining characters line up.
    pub fn render(&self) -> String {
        let key_width = self
            .rows
            .iter()
            .map(|row| row.object_id.width())
            .chain(std::iter::once(self.key_header.width()))
            .max()
            .unwrap_or(0);
        let total_width = self
            .rows
            .iter()
            .map(|row| row.total.width())
            .chain(std::iter::once(self.total_header.width()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        push_line(&mut out, &self.key_header, key_width, &self.total_header, total_width);
        out.push_str(&"-".repeat(key_width));
        out.push_str("  ");
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in &self.rows {
            push_line(&mut out, &row.object_id, key_width, &row.total, total_width);
        }

        out
    }
}

fn push_line(out: &mut String, key: &str, key_width: usize, total: &str, total_width: usize) {
    out.push_str(key);
    out.push_str(&" ".repeat(key_width - key.width()));
    out.push_str("  ");
    out.push_str(&" ".repeat(total_width - total.width()));
    out.push_str(total);
    out.push('\n');
}

impl fmt::Display for DisplayTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::RawRecord;
    use summary_engine::{calculate_summary, SummaryDefinition};

    fn table() -> DisplayTable {
        let records = vec![
            RawRecord::new("A", 1234.5),
            RawRecord::new("Ąžuolas", 7.0),
            RawRecord::new("A", 0.5),
        ];
        let summary = calculate_summary(&SummaryDefinition::default(), &records).unwrap();
        DisplayTable::from_summary(&summary, &LocaleNumberFormat::LITHUANIAN)
    }

    #[test]
    fn test_rows_are_formatted() {
        let table = table();
        assert_eq!(table.key_header, "Obj. Nr.");
        assert_eq!(table.total_header, "kWh_suvartota");
        assert_eq!(
            table.rows,
            vec![
                DisplayRow { object_id: "A".to_string(), total: "1 235,00".to_string() },
                DisplayRow { object_id: "Ąžuolas".to_string(), total: "7,00".to_string() },
            ]
        );
    }

    #[test]
    fn test_render_alignment() {
        let rendered = table().render();
        let expected = "\
Obj. Nr.  kWh_suvartota
--------  -------------
A              1 235,00
Ąžuolas            7,00
";
        assert_eq!(rendered, expected);
    }
}
