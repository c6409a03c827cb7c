//! Solid Ink invoices.

use tracing::debug;

use super::patterns::{
    SOLID_INK_HEADER, SOLID_INK_LINE, SOLID_INK_METADATA, SOLID_INK_SIZE, SOLID_INK_SIZE_LABEL,
};
use super::{Diagnostics, VendorGrammar};
use crate::models::document::Line;
use crate::models::item::{ParsedItem, SkipReason};
use crate::models::vendor::Vendor;
use crate::normalize::{finish, normalize_size};

/// Single-row grammar: `SKU description $price qty $amount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidInkGrammar;

impl SolidInkGrammar {
    pub fn new() -> Self {
        Self
    }

    fn parse_line(&self, line: &Line, diagnostics: &mut Diagnostics) -> Option<ParsedItem> {
        let text = line.text.trim();
        if SOLID_INK_HEADER.is_match(text) {
            diagnostics.skip(line, SkipReason::Boilerplate);
            return None;
        }

        let Some(caps) = SOLID_INK_LINE.captures(text) else {
            let reason = if SOLID_INK_METADATA.is_match(text) {
                SkipReason::Boilerplate
            } else {
                SkipReason::Unmatched
            };
            diagnostics.skip(line, reason);
            return None;
        };

        let item_code = &caps[1];
        let description = &caps[2];

        let color = derive_color(description);
        if color.is_empty() {
            diagnostics.skip(line, SkipReason::EmptyColor);
            return None;
        }

        let quantity = match caps[4].replace(',', "").parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => {
                diagnostics.skip(line, SkipReason::NonPositiveQuantity);
                return None;
            }
        };

        Some(ParsedItem::new(
            item_code,
            color,
            derive_size(description),
            quantity,
        ))
    }
}

impl VendorGrammar for SolidInkGrammar {
    fn vendor(&self) -> Vendor {
        Vendor::SolidInk
    }

    fn extract(&self, lines: &[Line], diagnostics: &mut Diagnostics) -> Vec<ParsedItem> {
        let items: Vec<ParsedItem> = lines
            .iter()
            .filter_map(|line| self.parse_line(line, diagnostics))
            .collect();
        debug!("Solid Ink: {} items from {} lines", items.len(), lines.len());
        items
    }
}

fn derive_size(description: &str) -> String {
    let raw = SOLID_INK_SIZE
        .find(description)
        .map(|m| m.as_str().split_whitespace().collect::<String>())
        .unwrap_or_else(|| "1 ounce".to_string());
    normalize_size(&raw)
}

/// Description minus the `- Size: 1oz` token and `|` separators.
fn derive_color(description: &str) -> String {
    let without_size = SOLID_INK_SIZE_LABEL.replacen(description, 1, "");
    finish(&without_size.replace('|', " "))
}
