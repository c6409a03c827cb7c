//! Subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod lines;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use futures_util::TryStreamExt;
use tracing::debug;

use inkvoice_core::{
    InkvoiceConfig, Page, PdfTextExtractor, StaticPages, TextExtractor,
};

/// File extensions accepted as invoice input.
pub const INPUT_EXTENSIONS: [&str; 2] = ["pdf", "json"];

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inkvoice")
        .join("config.json")
}

/// Load the configuration from `path`, the default location, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<InkvoiceConfig> {
    if let Some(path) = path {
        return Ok(InkvoiceConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(InkvoiceConfig::from_file(&default_path)?)
    } else {
        Ok(InkvoiceConfig::default())
    }
}

/// An opened invoice: the backend that reads it and the bytes to feed it.
pub struct Source {
    pub extractor: Box<dyn TextExtractor>,
    pub data: Vec<u8>,
}

impl Source {
    /// Open a PDF, or a JSON dump of pre-extracted pages
    /// (`[{ "index": 1, "fragments": [{ "text", "x", "y" }] }]`).
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(Self {
                extractor: Box::new(PdfTextExtractor::new()),
                data: fs::read(path)?,
            }),
            "json" => {
                let pages: Vec<Page> = serde_json::from_str(&fs::read_to_string(path)?)?;
                let pages = pages
                    .into_iter()
                    .map(|page| Page::new(page.index, page.fragments))
                    .collect();
                Ok(Self {
                    extractor: Box::new(StaticPages::new(pages)),
                    data: Vec::new(),
                })
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Drain every page from the backend.
    pub async fn pages(&self) -> anyhow::Result<Vec<Page>> {
        let pages = self.extractor.extract_pages(&self.data).try_collect().await?;
        Ok(pages)
    }
}

/// Whether `path` looks like an invoice input.
pub fn is_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
