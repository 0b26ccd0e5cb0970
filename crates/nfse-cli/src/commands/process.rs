//! Process command - extract data from a single invoice PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use nfse_core::batch::Pipeline;

use super::load_config;
use super::output::{export_csv, format_report, OutputFormat, SINGLE_EXPORT_PREFIX};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also save the fields as dados_nf_<timestamp>.csv in this directory
    #[arg(long, value_name = "DIR")]
    export_csv: Option<PathBuf>,

    /// Text extraction time limit in milliseconds (0 = no limit)
    #[arg(long)]
    timeout_ms: Option<u64>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.pdf.timeout_ms = timeout_ms;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Extracting invoice data...");

    let pipeline = Pipeline::from_config(&config);
    let input = args.input.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.process_file(&input)).await?;
    pb.finish_and_clear();
    let report = outcome?;

    if !report.problems.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for problem in &report.problems {
            eprintln!("  - {}", problem);
        }
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    if let Some(dir) = &args.export_csv {
        let path = export_csv(dir, SINGLE_EXPORT_PREFIX, [&report.fields])?;
        println!("{} CSV saved to {}", style("✓").green(), path.display());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
