//! Per-vendor line grammars.

mod eternal;
pub mod naming;
pub mod patterns;
mod solid_ink;
mod world_famous;

pub use eternal::EternalGrammar;
pub use solid_ink::SolidInkGrammar;
pub use world_famous::WorldFamousGrammar;

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::document::Line;
use crate::models::item::{Diagnostic, ParsedItem, SkipReason};
use crate::models::vendor::Vendor;

/// Trait for vendor grammars.
pub trait VendorGrammar {
    /// Vendor this grammar reads.
    fn vendor(&self) -> Vendor;

    /// Extract items from reconstructed lines, in line order.
    ///
    /// Lines that contribute nothing are reported to `diagnostics`.
    fn extract(&self, lines: &[Line], diagnostics: &mut Diagnostics) -> Vec<ParsedItem>;
}

/// Grammar for `vendor`.
pub fn grammar_for(vendor: Vendor, config: &ExtractionConfig) -> Box<dyn VendorGrammar> {
    match vendor {
        Vendor::WorldFamous => Box::new(WorldFamousGrammar::new(
            config.lookahead_lines,
            config.description_lines,
        )),
        Vendor::Eternal => Box::new(EternalGrammar::new()),
        Vendor::SolidInk => Box::new(SolidInkGrammar::new()),
    }
}

/// Collector for skipped lines.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    enabled: bool,
}

impl Diagnostics {
    /// Create a collector. A disabled collector only traces.
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Vec::new(),
            enabled,
        }
    }

    /// Record that `line` was skipped.
    pub fn skip(&mut self, line: &Line, reason: SkipReason) {
        trace!("Skipped line on page {} ({}): {}", line.page, reason, line.text);
        if self.enabled {
            self.entries.push(Diagnostic::new(line.page, line.text.clone(), reason));
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
