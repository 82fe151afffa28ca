//! FILENAME: app/src/config.rs
// PURPOSE: Pipeline configuration (sheet layout, summary labels, output names, chart).
// CONTEXT: Every field has a default equal to the fixed values the upload form
//          always used, so an empty `{}` config file is valid. The CLI applies
//          its flags on top of whatever was loaded.

use std::path::Path;

use persistence::{ExportOptions, SheetLayout, EXPORT_FILE_NAME, XLSX_EXPORT_FILE_NAME};
use serde::{Deserialize, Serialize};
use summary_engine::SummaryDefinition;
use thiserror::Error;

use crate::chart::ChartSettings;

/// Default file name of the rendered chart.
pub const CHART_FILE_NAME: &str = "top_objects.svg";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

// ============================================================================
// OUTPUT FILE NAMES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub csv: String,
    pub xlsx: String,
    pub chart: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            csv: EXPORT_FILE_NAME.to_string(),
            xlsx: XLSX_EXPORT_FILE_NAME.to_string(),
            chart: CHART_FILE_NAME.to_string(),
        }
    }
}

// ============================================================================
// PIPELINE CONFIG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the records live in the uploaded workbook.
    pub layout: SheetLayout,
    /// Output labels, sort direction and chart size.
    pub summary: SummaryDefinition,
    pub outputs: OutputNames,
    pub chart: ChartSettings,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_json(&json)
    }

    /// Points the layout at another sheet.
    pub fn with_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.layout.sheet_name = sheet_name.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.summary.top_n = top_n;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("layout.sheet_name", &self.layout.sheet_name),
            ("layout.key_column", &self.layout.key_column),
            ("layout.value_column", &self.layout.value_column),
            ("summary.key_label", &self.summary.key_label),
            ("summary.total_label", &self.summary.total_label),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", field)));
            }
        }

        if self.summary.top_n == 0 {
            return Err(ConfigError::Invalid("summary.top_n must be at least 1".to_string()));
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::Invalid("chart size must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Export headers follow the summary labels.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::new(&self.summary.key_label, &self.summary.total_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summary_engine::SortOrder;

    #[test]
    fn test_defaults_match_upload_form() {
        let config = PipelineConfig::default();
        assert_eq!(config.layout.sheet_name, "duomenys_analizei");
        assert_eq!(config.layout.key_column, "Obj. Nr.");
        assert_eq!(config.layout.value_column, "Skirtumas");
        assert_eq!(config.summary.total_label, "kWh_suvartota");
        assert_eq!(config.summary.top_n, 10);
        assert_eq!(config.outputs.csv, "obj_nr_kWh_consumption_all_rows.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = PipelineConfig::from_json(
            r#"{
                "layout": { "sheet_name": "2024" },
                "summary": { "sort_order": "ascending", "top_n": 5 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout.sheet_name, "2024");
        assert_eq!(config.layout.key_column, "Obj. Nr.");
        assert_eq!(config.summary.sort_order, SortOrder::Ascending);
        assert_eq!(config.summary.top_n, 5);
        assert_eq!(config.summary.total_label, "kWh_suvartota");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            PipelineConfig::from_json(r#"{ "summary": { "top_n": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json(r#"{ "layout": { "sheet_name": " " } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "outputs": { "csv": "out.csv" } }"#).unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.outputs.csv, "out.csv");

        let missing = PipelineConfig::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
