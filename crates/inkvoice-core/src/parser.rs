//! Parse orchestration: pages in, validated stock lines out.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{InkvoiceError, Result};
use crate::layout::reconstruct_pages;
use crate::models::config::InkvoiceConfig;
use crate::models::document::{Line, Page};
use crate::models::item::{Diagnostic, ParseResult};
use crate::models::vendor::Vendor;
use crate::pdf::TextExtractor;
use crate::vendors::{grammar_for, Diagnostics};

/// Result of parsing one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    /// Grammar that produced the items.
    pub vendor: Vendor,
    /// Items in invoice order.
    pub items: ParseResult,
    /// Lines that contributed nothing, in scan order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of pages read.
    pub page_count: usize,
    /// Number of reconstructed lines.
    pub line_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Invoice parser driving line reconstruction and the vendor grammars.
#[derive(Debug, Clone, Default)]
pub struct InvoiceParser {
    config: InkvoiceConfig,
}

impl InvoiceParser {
    /// Create a parser with the given configuration.
    pub fn new(config: InkvoiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InkvoiceConfig {
        &self.config
    }

    /// Reconstruct the lines the `vendor` grammar would see.
    pub fn reconstruct(&self, vendor: Vendor, pages: &[Page]) -> Vec<Line> {
        reconstruct_pages(pages, self.config.layout.grouping_for(vendor))
    }

    /// Parse pages that have already been extracted.
    ///
    /// Pages may be given in any order; they are read by ascending index.
    pub fn parse_pages(&self, vendor: Vendor, pages: &[Page]) -> Result<ParseOutcome> {
        let start = stopwatch();
        let lines = self.reconstruct(vendor, pages);
        self.run(vendor, &lines, pages.len(), start)
    }

    /// Parse lines that have already been reconstructed.
    pub fn parse_lines(&self, vendor: Vendor, lines: &[Line]) -> Result<ParseOutcome> {
        let start = stopwatch();
        let page_count = lines.chunk_by(|a, b| a.page == b.page).count();
        self.run(vendor, lines, page_count, start)
    }

    /// Extract a document with `extractor` and parse it.
    ///
    /// Every page is buffered before parsing starts, so the order in which
    /// the extractor yields pages does not affect the result. Extractor
    /// failures surface as [`InkvoiceError::MalformedInput`].
    pub async fn parse_document<E>(
        &self,
        extractor: &E,
        data: &[u8],
        vendor: Vendor,
    ) -> Result<ParseOutcome>
    where
        E: TextExtractor + ?Sized,
    {
        let start = stopwatch();
        let mut pages: Vec<Page> = extractor.extract_pages(data).try_collect().await?;
        pages.sort_by_key(|page| page.index);
        debug!("Extracted {} pages ({} bytes)", pages.len(), data.len());

        let lines = self.reconstruct(vendor, &pages);
        self.run(vendor, &lines, pages.len(), start)
    }

    fn run(
        &self,
        vendor: Vendor,
        lines: &[Line],
        page_count: usize,
        start: Option<Stopwatch>,
    ) -> Result<ParseOutcome> {
        let grammar = grammar_for(vendor, &self.config.extraction);
        let mut diagnostics = Diagnostics::new(self.config.extraction.collect_diagnostics);
        let items = grammar.extract(lines, &mut diagnostics);

        if items.is_empty() {
            debug!("No {} items in {} lines", vendor, lines.len());
            return Err(InkvoiceError::NoItemsFound { vendor });
        }

        let outcome = ParseOutcome {
            vendor,
            items,
            diagnostics: diagnostics.into_entries(),
            page_count,
            line_count: lines.len(),
            processing_time_ms: elapsed_ms(start),
        };

        info!(
            "Parsed {} {} items from {} pages ({} lines skipped) in {}ms",
            outcome.items.len(),
            vendor,
            outcome.page_count,
            outcome.diagnostics.len(),
            outcome.processing_time_ms
        );

        Ok(outcome)
    }
}

#[cfg(not(target_arch = "wasm32"))]
type Stopwatch = Instant;

#[cfg(target_arch = "wasm32")]
type Stopwatch = ();

#[cfg(not(target_arch = "wasm32"))]
fn stopwatch() -> Option<Stopwatch> {
    Some(Instant::now())
}

// No monotonic clock on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
fn stopwatch() -> Option<Stopwatch> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn elapsed_ms(start: Option<Stopwatch>) -> u64 {
    start.map_or(0, |s| s.elapsed().as_millis() as u64)
}

#[cfg(target_arch = "wasm32")]
fn elapsed_ms(_start: Option<Stopwatch>) -> u64 {
    0
}
