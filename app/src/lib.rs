//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the kWh summary shell.
// CONTEXT: Composes the engine, summary-engine and persistence crates into one
//          pipeline and adds the caller-facing pieces: configuration, the
//          results table, the chart and logging.

pub mod chart;
pub mod config;
pub mod display;
pub mod logging;
pub mod pipeline;

pub use chart::{render_bar_chart_svg, ChartSettings};
pub use config::{ConfigError, OutputNames, PipelineConfig};
pub use display::{DisplayRow, DisplayTable};
pub use logging::init_logging;
pub use pipeline::{run, run_path, write_outputs, PipelineError, PipelineOutput, PipelineReport, WriteOptions};
