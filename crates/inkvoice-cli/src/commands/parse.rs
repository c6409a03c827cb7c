//! Parse command - extract stock lines from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use inkvoice_core::{InvoiceParser, ParseOutcome, Vendor};

use super::{load_config, Source};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF or JSON page dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Invoice vendor (worldFamous, eternal, solidInk)
    #[arg(long)]
    vendor: Vendor,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include skipped-line diagnostics
    #[arg(long)]
    diagnostics: bool,
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
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let source = Source::open(&args.input)?;

    info!("Parsing {} as {}", args.input.display(), args.vendor);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {} invoice...", args.vendor.display_name()));

    let parser = InvoiceParser::new(config);
    let result = parser
        .parse_document(source.extractor.as_ref(), &source.data, args.vendor)
        .await;
    pb.finish_and_clear();
    let outcome = result?;

    let output = format_outcome(&outcome, args.format, args.diagnostics)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.diagnostics && !matches!(args.format, OutputFormat::Json) {
        for diagnostic in &outcome.diagnostics {
            eprintln!(
                "{} page {}: {} ({})",
                style("skipped").yellow(),
                diagnostic.page,
                diagnostic.line,
                diagnostic.reason
            );
        }
    }

    debug!("Total processing time: {}ms", outcome.processing_time_ms);

    Ok(())
}

/// Render an outcome. JSON carries the whole outcome when `diagnostics` is
/// set, otherwise only the items.
pub fn format_outcome(
    outcome: &ParseOutcome,
    format: OutputFormat,
    diagnostics: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let json = if diagnostics {
                serde_json::to_string_pretty(outcome)?
            } else {
                serde_json::to_string_pretty(&outcome.items)?
            };
            Ok(format!("{}\n", json))
        }
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ParseOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["itemCode", "color", "size", "quantity"])?;
    for item in &outcome.items {
        wtr.write_record([
            item.item_code.as_str(),
            item.color.as_str(),
            item.size.as_str(),
            &item.quantity.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ParseOutcome) -> String {
    let units: u64 = outcome.items.iter().map(|i| u64::from(i.quantity)).sum();

    let mut output = String::new();
    output.push_str(&format!("Vendor: {}\n", outcome.vendor.display_name()));
    output.push_str(&format!(
        "Items: {} ({} units, {} pages)\n",
        outcome.items.len(),
        units,
        outcome.page_count
    ));
    output.push('\n');

    for item in &outcome.items {
        output.push_str(&format!(
            "{:>6}  {:<12} {} ({})\n",
            item.quantity, item.item_code, item.color, item.size
        ));
    }

    output
}
