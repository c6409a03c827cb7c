//! Lines command - show reconstructed lines for grammar debugging.

use std::path::PathBuf;

use clap::Args;

use inkvoice_core::{InvoiceParser, Vendor};

use super::{load_config, Source};

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Input file (PDF or JSON page dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Vendor whose line grouping is applied
    #[arg(long)]
    vendor: Vendor,
}

pub async fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let source = Source::open(&args.input)?;
    let pages = source.pages().await?;

    let parser = InvoiceParser::new(config);
    for line in parser.reconstruct(args.vendor, &pages) {
        println!("{}:{} {}", line.page, line.y, line.text);
    }

    Ok(())
}
