//! Batch command - extract data from every invoice PDF in a directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

use nfse_core::batch::BatchProcessor;
use nfse_core::models::result::DocumentResult;

use super::load_config;
use super::output::{export_csv, BATCH_EXPORT_PREFIX};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing the invoice PDFs
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Directory for the summary CSV (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write every per-file result as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Do not write the summary CSV
    #[arg(long)]
    no_summary: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Process files in name order instead of directory order
    #[arg(long)]
    sorted: bool,
}

/// Machine-readable outcome of a batch run.
#[derive(Serialize)]
struct BatchReport<'a> {
    processed: usize,
    successful: usize,
    failed: usize,
    results: &'a [DocumentResult],
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    config.discovery.recursive |= args.recursive;
    config.discovery.sort_by_name |= args.sorted;

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", args.input_dir.display());
    }

    let processor = BatchProcessor::from_config(&config);
    let dir = args.input_dir.clone();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let bar = pb.clone();
    let results = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<DocumentResult>> {
        let mut run = processor.run(&dir)?;
        bar.set_length(run.len() as u64);

        let mut results = Vec::with_capacity(run.len());
        loop {
            if let Some(next) = run.peek_path() {
                let name = next.file_name().unwrap_or_default().to_string_lossy().into_owned();
                bar.set_message(name);
            }
            let Some(result) = run.next() else {
                break;
            };
            results.push(result);
            bar.inc(1);
        }
        Ok(results)
    })
    .await??;

    pb.finish_and_clear();

    if results.is_empty() {
        println!(
            "{} No PDF files found in {}",
            style("ℹ").blue(),
            args.input_dir.display()
        );
        return Ok(());
    }

    let successful: Vec<_> = results.iter().filter(|r| r.is_success()).collect();
    let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();

    if !args.no_summary && !successful.is_empty() {
        let dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let path = export_csv(&dir, BATCH_EXPORT_PREFIX, successful.iter().copied().map(DocumentResult::fields))?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            path.display()
        );
    }

    if let Some(json_path) = &args.json {
        let report = BatchReport {
            processed: results.len(),
            successful: successful.len(),
            failed: failed.len(),
            results: &results,
        };
        fs::write(json_path, serde_json::to_string_pretty(&report)?)?;
        debug!("Wrote results to {}", json_path.display());
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    let incomplete: Vec<_> = successful.iter().filter(|r| !r.is_complete()).collect();
    if !incomplete.is_empty() {
        println!();
        println!("{}", style("Incomplete extractions:").yellow());
        for result in incomplete {
            println!("  {}", result.file_name());
            for problem in result.problems() {
                println!("    - {}", problem);
            }
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.file_name(),
                result.error_message().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
