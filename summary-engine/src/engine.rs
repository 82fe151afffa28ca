//! FILENAME: summary-engine/src/engine.rs
//! Summary Engine - The calculation core that turns raw records into totals.
//!
//! Algorithm:
//! 1. Coerce every record's delta to a number (missing when unparseable)
//! 2. Accumulate into a map keyed by object id, remembering first-seen order
//! 3. Stable-sort the groups by total in the definition's direction
//! 4. Expose the leading rows as a chart series
//!
//! Sums are exact decimals, converted to `f64` once per group. The sum for a
//! key does not depend on where its rows sit in the input; only the tie-break
//! between equal totals looks at first-seen order.

use std::cmp::Ordering;

use engine::{RawRecord, SummaryRow};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::{SortOrder, SummaryDefinition};
use crate::error::SummaryError;

// ============================================================================
// GROUP ACCUMULATOR
// ============================================================================

/// Running state for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub object_id: String,
    /// Exact sum of every non-missing value. Zero when all values were missing.
    pub total: Decimal,
    /// Values that contributed to `total`.
    pub value_count: usize,
    /// Values that were missing and contributed nothing.
    pub missing_count: usize,
}

/// Order-insensitive group-sum accumulator.
///
/// Groups are stored in first-seen order; lookups go through a hash index.
#[derive(Debug, Default)]
pub struct GroupAccumulator {
    index: FxHashMap<String, usize>,
    groups: Vec<GroupTotal>,
}

impl GroupAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value to the group `object_id`, creating the group on first sight.
    ///
    /// Fails when the value or the running total leaves the decimal range.
    pub fn add(&mut self, object_id: &str, value: Option<f64>) -> Result<(), SummaryError> {
        let slot = match self.index.get(object_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(object_id.to_string(), slot);
                self.groups.push(GroupTotal {
                    object_id: object_id.to_string(),
                    total: Decimal::ZERO,
                    value_count: 0,
                    missing_count: 0,
                });
                slot
            }
        };

        let group = &mut self.groups[slot];
        match value {
            Some(v) => {
                group.total = Decimal::from_f64(v)
                    .and_then(|d| group.total.checked_add(d))
                    .ok_or_else(|| overflow(object_id))?;
                group.value_count += 1;
            }
            None => group.missing_count += 1,
        }
        Ok(())
    }

    pub fn get(&self, object_id: &str) -> Option<&GroupTotal> {
        self.index.get(object_id).map(|&slot| &self.groups[slot])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the accumulator, returning groups in first-seen order.
    pub fn finish(self) -> Vec<GroupTotal> {
        self.groups
    }
}

/// Group-sums `(object_id, value)` pairs. Output is in first-seen order.
pub fn aggregate<'a, I>(pairs: I) -> Result<Vec<GroupTotal>, SummaryError>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut acc = GroupAccumulator::new();
    for (object_id, value) in pairs {
        acc.add(object_id, value)?;
    }
    Ok(acc.finish())
}

fn overflow(object_id: &str) -> SummaryError {
    SummaryError::Overflow {
        object_id: object_id.to_string(),
    }
}

/// The `f64` nearest to an exact total. Equal decimals always give equal floats.
fn to_float(object_id: &str, total: Decimal) -> Result<f64, SummaryError> {
    total
        .normalize()
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| overflow(object_id))
}

// ============================================================================
// SORT
// ============================================================================

/// Sorts rows by total. `sort_by` is stable, so exactly equal totals stay in
/// the order they arrived in.
pub fn sort_rows(rows: &mut [SummaryRow], order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Parallel label/value sequences for a bar chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Bookkeeping gathered while aggregating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub record_count: usize,
    pub missing_count: usize,
    pub group_count: usize,
    /// Sum of every valid delta across all groups.
    pub grand_total: f64,
}

/// The sorted result of one summary calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub definition: SummaryDefinition,
    pub rows: Vec<SummaryRow>,
    pub stats: SummaryStats,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, object_id: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.object_id == object_id)
    }

    /// The first `n` rows in sort order, as raw (unformatted) values.
    pub fn top_n(&self, n: usize) -> ChartSeries {
        let head = &self.rows[..n.min(self.rows.len())];
        ChartSeries {
            labels: head.iter().map(|row| row.object_id.clone()).collect(),
            values: head.iter().map(|row| row.total).collect(),
        }
    }

    /// The chart series sized by the definition's `top_n`.
    pub fn chart_series(&self) -> ChartSeries {
        self.top_n(self.definition.top_n)
    }
}

/// Calculates the sorted per-object summary for `records`.
pub fn calculate_summary(
    definition: &SummaryDefinition,
    records: &[RawRecord],
) -> Result<Summary, SummaryError> {
    if records.is_empty() {
        return Err(SummaryError::EmptyInput);
    }

    let mut acc = GroupAccumulator::new();
    for record in records {
        acc.add(&record.object_id, record.numeric_delta())?;
    }
    let groups = acc.finish();

    let missing_count = groups.iter().map(|g| g.missing_count).sum();

    let mut grand_total = Decimal::ZERO;
    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        grand_total = grand_total
            .checked_add(group.total)
            .ok_or_else(|| overflow(&group.object_id))?;
        let total = to_float(&group.object_id, group.total)?;
        rows.push(SummaryRow::new(group.object_id, total));
    }
    let grand_total = to_float("all objects", grand_total)?;

    sort_rows(&mut rows, definition.sort_order);

    let stats = SummaryStats {
        record_count: records.len(),
        missing_count,
        group_count: rows.len(),
        grand_total,
    };

    Ok(Summary {
        definition: definition.clone(),
        rows,
        stats,
    })
}

// ============================================================================
// TESTS
// ============================================================================
