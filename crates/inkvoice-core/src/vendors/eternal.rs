//! Eternal Ink invoices: one item per row.

use tracing::debug;

use super::patterns::{
    ETERNAL_BOILERPLATE, ETERNAL_CODE_SIZE, ETERNAL_DESCRIPTION_SIZE, ETERNAL_LINE,
    ETERNAL_PLACEHOLDER,
};
use super::{Diagnostics, VendorGrammar};
use crate::models::document::Line;
use crate::models::item::{ParsedItem, SkipReason};
use crate::models::vendor::Vendor;
use crate::normalize::{normalize_size, spaced_size, ColorCleaner};

/// Single-row grammar with the size folded into the SKU or description.
#[derive(Debug, Clone)]
pub struct EternalGrammar {
    cleaner: ColorCleaner,
}

impl EternalGrammar {
    pub fn new() -> Self {
        Self {
            cleaner: ColorCleaner::new()
                .with_strip_parentheticals(true)
                .with_truncate_at(&["Bottle", "Set"]),
        }
    }

    fn parse_line(&self, line: &Line, diagnostics: &mut Diagnostics) -> Option<ParsedItem> {
        let text = line.text.trim();
        if ETERNAL_BOILERPLATE.is_match(text) {
            diagnostics.skip(line, SkipReason::Boilerplate);
            return None;
        }

        let Some(caps) = ETERNAL_LINE.captures(text) else {
            diagnostics.skip(line, SkipReason::Unmatched);
            return None;
        };

        let item_code = &caps[1];
        let description = caps[2].trim();

        if item_code.to_lowercase().contains("discount") {
            diagnostics.skip(line, SkipReason::Discount);
            return None;
        }

        let color = self.cleaner.clean(description, item_code);
        if color.is_empty() {
            diagnostics.skip(line, SkipReason::EmptyColor);
            return None;
        }
        if ETERNAL_PLACEHOLDER.is_match(&color) {
            diagnostics.skip(line, SkipReason::PlaceholderColor);
            return None;
        }

        let quantity = match caps[3].replace(',', "").parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => {
                diagnostics.skip(line, SkipReason::NonPositiveQuantity);
                return None;
            }
        };

        Some(ParsedItem::new(
            item_code,
            color,
            derive_size(item_code, description),
            quantity,
        ))
    }
}

impl Default for EternalGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorGrammar for EternalGrammar {
    fn vendor(&self) -> Vendor {
        Vendor::Eternal
    }

    fn extract(&self, lines: &[Line], diagnostics: &mut Diagnostics) -> Vec<ParsedItem> {
        let items: Vec<ParsedItem> = lines
            .iter()
            .filter_map(|line| self.parse_line(line, diagnostics))
            .collect();
        debug!("Eternal: {} items from {} lines", items.len(), lines.len());
        items
    }
}

/// Sizes checked in order against both the SKU suffix and the description.
const PREFERRED_SIZES: [&str; 3] = ["1/2", "4", "2"];

/// Size in the spaced form Eternal stock tables use.
///
/// Half ounce beats 4 oz beats 2 oz wherever each is found (`EI-2` with
/// "1/2 ounce" in the description is a half-ounce bottle). Any other amount
/// in the description comes next, then 1 oz.
fn derive_size(item_code: &str, description: &str) -> String {
    let code_size = ETERNAL_CODE_SIZE
        .captures(item_code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    let described: Vec<&str> = ETERNAL_DESCRIPTION_SIZE
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let amount = PREFERRED_SIZES
        .into_iter()
        .find(|size| code_size == Some(*size) || described.contains(size))
        .or_else(|| described.first().copied())
        .unwrap_or("1");

    spaced_size(&normalize_size(&format!("{} ounce", amount)))
}
