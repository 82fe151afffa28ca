//! FILENAME: summary-engine/src/lib.rs
//! Per-object consumption summary for the kWh pipeline.
//!
//! This crate turns a set of `RawRecord`s into a sorted list of
//! `SummaryRow`s. It depends on `engine` only for the shared row types and
//! numeric coercion.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the summary IS)
//! - `engine`: Group-sum accumulator, sort and top-N selection (HOW we calculate)

pub mod definition;
pub mod engine;
pub mod error;

pub use self::definition::*;
pub use self::engine::{aggregate, calculate_summary, sort_rows, ChartSeries, GroupAccumulator, GroupTotal, Summary, SummaryStats};
pub use self::error::SummaryError;
