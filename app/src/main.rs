//! FILENAME: app/src/main.rs
// PURPOSE: Command-line shell: reads an uploaded workbook, prints the results
//          table and writes the export files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use kwh_summary::{init_logging, run_path, write_outputs, PipelineConfig, PipelineError, WriteOptions};

#[derive(Parser, Debug)]
#[command(name = "kwh-summary", version, about = "Sum kWh consumption per object from an XLSX reading sheet")]
struct Cli {
    /// XLSX workbook containing the reading sheet
    input: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet to read instead of the configured one
    #[arg(long)]
    sheet: Option<String>,

    /// Directory for the exported files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of objects shown in the chart
    #[arg(long)]
    top: Option<usize>,

    /// Also write the summary as an XLSX workbook
    #[arg(long)]
    xlsx: bool,

    /// Skip the chart
    #[arg(long)]
    no_chart: bool,

    /// Print the full report as JSON instead of the table
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn load_config(cli: &Cli) -> Result<PipelineConfig, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(sheet) = &cli.sheet {
        config = config.with_sheet(sheet.clone());
    }
    if let Some(top) = cli.top {
        config = config.with_top_n(top);
    }

    config.validate()?;
    Ok(config)
}

fn execute(cli: &Cli) -> Result<(), PipelineError> {
    let config = load_config(cli)?;
    let output = run_path(&cli.input, &config)?;

    let options = WriteOptions {
        chart: !cli.no_chart,
        xlsx: cli.xlsx,
    };
    let written = write_outputs(&output, &config, &cli.out_dir, options)?;

    if cli.json {
        let report = output.report(&config.layout.sheet_name);
        let json = serde_json::to_string_pretty(&report).map_err(|e| PipelineError::Export(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", output.display);
        println!();
        for path in &written {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Pipeline failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
