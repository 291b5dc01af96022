//! Scan command - extract contact fields from a single message body.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use sigcard_core::{scan_message, ActionStatus, ExtractionResult, SenderIdentity, SignatureScanner};

use super::{load_config, FileBody};

/// Sender identity flags shared by the commands that scan messages.
#[derive(Args, Clone, Default)]
pub struct SenderArgs {
    /// Sender email address (used as the contact email)
    #[arg(long, default_value = "")]
    pub sender_email: String,

    /// Sender display name (used when no name is found in the signature)
    #[arg(long, default_value = "")]
    pub sender_name: String,
}

impl SenderArgs {
    pub fn identity(&self) -> SenderIdentity {
        SenderIdentity::new(self.sender_email.clone(), self.sender_name.clone())
    }
}

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// HTML message body file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    sender: SenderArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the normalized plain text to stderr
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Scanning {}", args.input.display());

    let scanner = SignatureScanner::from_config(&config.extraction);
    let result = scan_message(&FileBody::new(&args.input), &args.sender.identity(), &scanner).await;
    let status = ActionStatus::from_scan(&result);
    let Ok(report) = result else {
        anyhow::bail!("{}", status.message());
    };

    if args.show_text {
        eprintln!("{}", style("Normalized text:").blue());
        eprintln!("{}", report.text);
        eprintln!();
    }

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
    eprintln!("{} {}", style("✓").green(), status.message());

    let output = format_result(&report.result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["full_name", "phone", "email"])?;
    wtr.write_record([&result.full_name, &result.phone, &result.email])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

fn format_text(result: &ExtractionResult) -> String {
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    format!(
        "Name:  {}\nPhone: {}\nEmail: {}",
        or_dash(&result.full_name),
        or_dash(&result.phone),
        or_dash(&result.email)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marie() -> ExtractionResult {
        ExtractionResult {
            full_name: "Marie Curie".to_string(),
            phone: "0612345678".to_string(),
            email: "x@y.com".to_string(),
        }
    }

    #[test]
    fn test_format_csv() {
        let csv = format_result(&marie(), OutputFormat::Csv).unwrap();
        assert_eq!(csv, "full_name,phone,email\nMarie Curie,0612345678,x@y.com");
    }

    #[test]
    fn test_format_text_marks_missing_fields() {
        let text = format_result(&ExtractionResult::default(), OutputFormat::Text).unwrap();
        assert_eq!(text, "Name:  -\nPhone: -\nEmail: -");
    }

    #[test]
    fn test_format_json() {
        let json = format_result(&marie(), OutputFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"{"fullName":"Marie Curie","phone":"0612345678","email":"x@y.com"}"#
        );
    }
}
