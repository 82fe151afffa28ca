//! FILENAME: tests/test_outputs.rs
//! Integration tests for the files written after a pipeline run.

mod common;

use common::ReadingsFixture;
use engine::SummaryRow;
use kwh_summary::{run, write_outputs, PipelineConfig, PipelineError, WriteOptions};

#[test]
fn test_writes_csv_and_chart_by_default() {
    let config = PipelineConfig::default();
    let output = run(&ReadingsFixture::scenario(), &config).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = write_outputs(&output, &config, dir.path(), WriteOptions::default()).unwrap();

    let csv_path = dir.path().join("obj_nr_kWh_consumption_all_rows.csv");
    let chart_path = dir.path().join("top_objects.svg");
    assert_eq!(written, vec![csv_path.clone(), chart_path.clone()]);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, "Obj. Nr.;kWh_suvartota\nB;200,00\nA;150,00\n");

    let svg = std::fs::read_to_string(&chart_path).unwrap();
    assert!(svg.contains("Top 10 Objects by kWh Consumption"));
    assert!(!dir.path().join("obj_nr_kWh_consumption_all_rows.xlsx").exists());
}

#[test]
fn test_no_chart_and_xlsx() {
    let config = PipelineConfig::default();
    let output = run(&ReadingsFixture::scenario(), &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = WriteOptions { chart: false, xlsx: true };

    let written = write_outputs(&output, &config, dir.path(), options).unwrap();

    assert_eq!(written.len(), 2);
    assert!(!dir.path().join("top_objects.svg").exists());

    let xlsx = std::fs::read(dir.path().join("obj_nr_kWh_consumption_all_rows.xlsx")).unwrap();
    assert_eq!(persistence::sheet_names(&xlsx).unwrap(), vec!["kWh_suvartota".to_string()]);
}

#[test]
fn test_exported_csv_reads_back() {
    let config = PipelineConfig::default();
    let output = run(&ReadingsFixture::twelve_meters(), &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("exports").join("2024");

    write_outputs(&output, &config, &nested, WriteOptions::default()).unwrap();

    let rows = persistence::read_summary_csv_from_path(
        &nested.join(&config.outputs.csv),
        &config.export_options(),
    )
    .unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0], SummaryRow::new("LT-012", 1200.25));
    assert_eq!(rows.as_slice(), output.rows());
}

#[test]
fn test_rerun_overwrites_export() {
    let config = PipelineConfig::default();
    let dir = tempfile::tempdir().unwrap();

    let first = run(&ReadingsFixture::twelve_meters(), &config).unwrap();
    write_outputs(&first, &config, dir.path(), WriteOptions::default()).unwrap();
    let second = run(&ReadingsFixture::scenario(), &config).unwrap();
    write_outputs(&second, &config, dir.path(), WriteOptions::default()).unwrap();

    let csv = std::fs::read_to_string(dir.path().join(&config.outputs.csv)).unwrap();
    assert_eq!(csv, "Obj. Nr.;kWh_suvartota\nB;200,00\nA;150,00\n");
}

#[test]
fn test_failed_write_leaves_no_files() {
    let config = PipelineConfig::default();
    let output = run(&ReadingsFixture::scenario(), &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    // A directory where the workbook should go makes the last move fail.
    std::fs::create_dir(dir.path().join(&config.outputs.xlsx)).unwrap();
    let options = WriteOptions { chart: true, xlsx: true };

    let err = write_outputs(&output, &config, dir.path(), options).unwrap_err();

    assert!(matches!(err, PipelineError::Export(_)));
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from(&config.outputs.xlsx)]);
}

#[test]
fn test_report_serializes() {
    let output = run(&ReadingsFixture::scenario(), &PipelineConfig::default()).unwrap();

    let report = output.report("duomenys_analizei");
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["sheet"], "duomenys_analizei");
    assert_eq!(json["stats"]["group_count"], 2);
    assert_eq!(json["stats"]["missing_count"], 1);
    assert_eq!(json["table"]["rows"][0]["total"], "200,00");
    assert_eq!(json["rows"][1]["object_id"], "A");
    assert_eq!(json["chart"]["labels"][0], "B");
}
