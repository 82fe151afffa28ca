//! FILENAME: app/src/pipeline.rs
// PURPOSE: The aggregation pipeline: load -> coerce -> aggregate -> sort -> format/export/chart.
// CONTEXT: One call processes one uploaded workbook start to finish. Every
//          output is built in memory before anything is written, so a failure
//          at any step leaves no partial result behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use engine::SummaryRow;
use persistence::{LoadStats, PersistenceError};
use serde::Serialize;
use summary_engine::{calculate_summary, ChartSeries, Summary, SummaryError, SummaryStats};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::chart::render_bar_chart_svg;
use crate::config::{ConfigError, PipelineConfig};
use crate::display::DisplayTable;

// ============================================================================
// ERRORS
// ============================================================================

/// Every failure surfaces as one of these; `Display` is the user-facing message.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Sheet '{requested}' not found. Available sheets: {}", .available.join(", "))]
    SheetNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("Cannot read the uploaded file: {0}")]
    UnreadableFile(String),

    #[error("Cannot aggregate the data: {0}")]
    Aggregation(String),

    #[error("Cannot write output: {0}")]
    Export(String),

    #[error("Cannot render chart: {0}")]
    Chart(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<PersistenceError> for PipelineError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::SheetNotFound { requested, available } => {
                PipelineError::SheetNotFound { requested, available }
            }
            PersistenceError::MissingColumn { .. } => PipelineError::Aggregation(err.to_string()),
            PersistenceError::Io(_) | PersistenceError::XlsxRead(_) | PersistenceError::InvalidFormat(_) => {
                PipelineError::UnreadableFile(err.to_string())
            }
            PersistenceError::Csv(_) | PersistenceError::XlsxWrite(_) => PipelineError::Export(err.to_string()),
        }
    }
}

impl From<SummaryError> for PipelineError {
    fn from(err: SummaryError) -> Self {
        PipelineError::Aggregation(err.to_string())
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Everything one pipeline run hands back to the caller.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub summary: Summary,
    pub load_stats: LoadStats,
    /// Results table with formatted totals.
    pub display: DisplayTable,
    /// The delimited export, UTF-8.
    pub export_csv: Vec<u8>,
    /// Leading rows with raw totals.
    pub chart: ChartSeries,
}

impl PipelineOutput {
    pub fn rows(&self) -> &[SummaryRow] {
        &self.summary.rows
    }

    pub fn report(&self, sheet_name: &str) -> PipelineReport {
        PipelineReport {
            sheet: sheet_name.to_string(),
            load_stats: self.load_stats,
            stats: self.summary.stats,
            table: self.display.clone(),
            rows: self.summary.rows.clone(),
            chart: self.chart.clone(),
        }
    }
}

/// Serializable view of a run for front ends that consume JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub sheet: String,
    pub load_stats: LoadStats,
    pub stats: SummaryStats,
    pub table: DisplayTable,
    pub rows: Vec<SummaryRow>,
    pub chart: ChartSeries,
}

// ============================================================================
// RUN
// ============================================================================

/// Runs the whole pipeline over an in-memory workbook.
pub fn run(bytes: &[u8], config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;

    let loaded = persistence::load_sheet(bytes, &config.layout)?;
    let summary = calculate_summary(&config.summary, &loaded.records)?;

    log::info!(
        "Summarised {} record(s) from '{}' into {} object(s)",
        summary.stats.record_count,
        loaded.sheet_name,
        summary.stats.group_count
    );
    if summary.stats.missing_count > 0 {
        log::debug!(
            "{} '{}' value(s) were not numeric and contributed nothing",
            summary.stats.missing_count,
            config.layout.value_column
        );
    }

    let export_options = config.export_options();
    let display = DisplayTable::from_summary(&summary, &export_options.number_format);
    let export_csv = persistence::summary_csv_bytes(&summary.rows, &export_options)?;
    let chart = summary.chart_series();

    Ok(PipelineOutput {
        summary,
        load_stats: loaded.stats,
        display,
        export_csv,
        chart,
    })
}

/// Reads the workbook from disk, then runs the pipeline.
pub fn run_path(path: &Path, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let bytes = std::fs::read(path)
        .map_err(|e| PipelineError::UnreadableFile(format!("{}: {}", path.display(), e)))?;
    run(&bytes, config)
}

// ============================================================================
// WRITING OUTPUTS
// ============================================================================

/// Which optional files to write next to the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub chart: bool,
    pub xlsx: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { chart: true, xlsx: false }
    }
}

/// Writes the export (and optionally the chart and XLSX workbook) into `out_dir`.
///
/// Every file is rendered and written to a temporary file in `out_dir` first.
/// Only when all of them are on disk are they moved to their final names; a
/// failure at any point removes whatever this call already produced.
pub fn write_outputs(
    output: &PipelineOutput,
    config: &PipelineConfig,
    out_dir: &Path,
    options: WriteOptions,
) -> Result<Vec<PathBuf>, PipelineError> {
    let chart_svg = if options.chart {
        Some(render_bar_chart_svg(&output.chart, &config.chart, config.summary.top_n)?)
    } else {
        None
    };
    let xlsx = if options.xlsx {
        Some(persistence::summary_xlsx_bytes(output.rows(), &config.export_options())?)
    } else {
        None
    };

    let mut files: Vec<(PathBuf, &[u8])> = vec![(out_dir.join(&config.outputs.csv), output.export_csv.as_slice())];
    if let Some(svg) = &chart_svg {
        files.push((out_dir.join(&config.outputs.chart), svg.as_bytes()));
    }
    if let Some(bytes) = &xlsx {
        files.push((out_dir.join(&config.outputs.xlsx), bytes.as_slice()));
    }

    std::fs::create_dir_all(out_dir).map_err(|e| export_error(out_dir, e))?;

    // Dropping a staged file deletes it.
    let mut staged = Vec::with_capacity(files.len());
    for (path, contents) in files {
        let mut file = NamedTempFile::new_in(out_dir).map_err(|e| export_error(out_dir, e))?;
        file.write_all(contents)
            .and_then(|_| file.flush())
            .map_err(|e| export_error(file.path(), e))?;
        staged.push((file, path));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        if let Err(e) = file.persist(&path) {
            for done in &written {
                let _ = std::fs::remove_file(done);
            }
            return Err(export_error(&path, e.error));
        }
        log::info!("Exported {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn export_error(path: &Path, err: std::io::Error) -> PipelineError {
    PipelineError::Export(format!("{}: {}", path.display(), err))
}
