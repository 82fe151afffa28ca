//! FILENAME: engine/src/record.rs
//! PURPOSE: The two row types the pipeline moves between stages.
//! CONTEXT: `RawRecord` is one source row, owned for a single invocation.
//! `SummaryRow` is one aggregated group, immutable once produced.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::coerce::coerce_numeric;

/// One row of the source sheet, reduced to the two columns the summary needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Group key, already rendered to text.
    pub object_id: String,
    /// The delta cell exactly as it was read.
    pub delta: CellValue,
}

impl RawRecord {
    pub fn new(object_id: impl Into<String>, delta: impl Into<CellValue>) -> Self {
        RawRecord {
            object_id: object_id.into(),
            delta: delta.into(),
        }
    }

    /// The delta after numeric coercion. `None` is the missing-value marker.
    pub fn numeric_delta(&self) -> Option<f64> {
        coerce_numeric(&self.delta)
    }
}

/// One aggregated group: the sum of every valid delta sharing `object_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub object_id: String,
    pub total: f64,
}

impl SummaryRow {
    pub fn new(object_id: impl Into<String>, total: f64) -> Self {
        SummaryRow {
            object_id: object_id.into(),
            total,
        }
    }
}
