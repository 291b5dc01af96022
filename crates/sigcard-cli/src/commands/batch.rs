//! Batch command - scan multiple message bodies.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use sigcard_core::{scan_message, ExtractionResult, SignatureScanner};

use super::scan::{format_result, OutputFormat, SenderArgs};
use super::{load_config, FileBody};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    #[command(flatten)]
    sender: SenderArgs,

    /// Output directory (default: JSON array on stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single file.
#[derive(Serialize)]
struct BatchEntry {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ExtractionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "html" | "htm" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let scanner = SignatureScanner::from_config(&config.extraction);
    let sender = args.sender.identity();
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_message(&FileBody::new(&path), &sender, &scanner).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(report) => entries.push(BatchEntry {
                file: path,
                result: Some(report.result),
                error: None,
                processing_time_ms,
            }),
            Err(e) if args.continue_on_error => {
                warn!("Failed to scan {}: {}", path.display(), e);
                entries.push(BatchEntry {
                    file: path,
                    result: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
            Err(e) => {
                error!("Failed to scan {}: {}", path.display(), e);
                anyhow::bail!("Scan failed: {}", e);
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    match &args.output_dir {
        Some(output_dir) => write_outputs(output_dir, &entries, args.format)?,
        None => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &entries)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = entries.iter().filter(|e| e.error.is_some()).collect();

    eprintln!(
        "{} Scanned {} files in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for entry in &failed {
            eprintln!(
                "  - {}: {}",
                entry.file.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_outputs(output_dir: &Path, entries: &[BatchEntry], format: OutputFormat) -> anyhow::Result<()> {
    for entry in entries {
        let Some(result) = &entry.result else {
            continue;
        };

        let output_name = entry
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("message");

        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
        fs::write(&output_path, format_result(result, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "full_name",
        "phone",
        "email",
        "processing_time_ms",
        "error",
    ])?;

    for entry in entries {
        let filename = entry.file.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time_ms = entry.processing_time_ms.to_string();

        match &entry.result {
            Some(result) => wtr.write_record([
                filename,
                "success",
                &result.full_name,
                &result.phone,
                &result.email,
                &time_ms,
                "",
            ])?,
            None => wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                &time_ms,
                entry.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
