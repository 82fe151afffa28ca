//! FILENAME: summary-engine/src/definition.rs
//! Summary Definition - The serializable configuration.
//!
//! Describes WHAT summary to produce: how its columns are labelled, which
//! direction it is sorted in, and how many leading rows feed the chart.
//! Column lookup in the source sheet is the loader's concern, not this one.

use serde::{Deserialize, Serialize};

/// Number of leading rows charted by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Header of the grouping column in every output.
pub const DEFAULT_KEY_LABEL: &str = "Obj. Nr.";

/// Header of the aggregated column in every output.
pub const DEFAULT_TOTAL_LABEL: &str = "kWh_suvartota";

// ============================================================================
// SORT ORDER
// ============================================================================

/// Sort order applied to group totals. Equal totals keep the order in which
/// their keys first appeared in the input, in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

// ============================================================================
// SUMMARY DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryDefinition {
    /// Header for the group key column (e.g., "Obj. Nr.").
    pub key_label: String,

    /// Header for the total column (e.g., "kWh_suvartota").
    pub total_label: String,

    pub sort_order: SortOrder,

    /// How many leading rows the chart series contains.
    pub top_n: usize,
}

impl SummaryDefinition {
    pub fn new(key_label: impl Into<String>, total_label: impl Into<String>) -> Self {
        SummaryDefinition {
            key_label: key_label.into(),
            total_label: total_label.into(),
            sort_order: SortOrder::Descending,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

impl Default for SummaryDefinition {
    fn default() -> Self {
        SummaryDefinition::new(DEFAULT_KEY_LABEL, DEFAULT_TOTAL_LABEL)
    }
}
