//! World Famous / Kuro Sumi sales orders.
//!
//! Each order line is spread over several rows: a numeric row carrying the
//! quantity, then the SKU, then one or two description rows. The quantity
//! row anchors the item; the SKU is searched in the rows that follow it.

use tracing::debug;

use super::naming::{friendly_name, NamingRule};
use super::patterns::{
    MID_TONE, WF_BOILERPLATE, WF_DESCRIPTION_SIZE, WF_ITEM_CODE, WF_QUANTITY_LINE,
};
use super::{Diagnostics, VendorGrammar};
use crate::models::document::Line;
use crate::models::item::{ParsedItem, SkipReason};
use crate::models::vendor::Vendor;
use crate::normalize::{finish, normalize_size, strip_trailing_number, ColorCleaner};

/// Quantity-anchored lookahead grammar.
#[derive(Debug, Clone)]
pub struct WorldFamousGrammar {
    lookahead: usize,
    description_lines: usize,
    cleaner: ColorCleaner,
}

impl WorldFamousGrammar {
    /// Create a grammar searching `lookahead` rows for the SKU and reading
    /// the description from `description_lines` rows starting at it.
    pub fn new(lookahead: usize, description_lines: usize) -> Self {
        Self {
            lookahead,
            description_lines,
            cleaner: ColorCleaner::new()
                .with_strip_words(&["Tattoo Ink", "Ink"])
                .with_dashes_as_spaces(true),
        }
    }

    fn extract_page(&self, lines: &[Line], items: &mut Vec<ParsedItem>, diagnostics: &mut Diagnostics) {
        for (i, line) in lines.iter().enumerate() {
            let text = line.text.trim();
            if WF_BOILERPLATE.is_match(text) {
                diagnostics.skip(line, SkipReason::Boilerplate);
                continue;
            }

            let Some(caps) = WF_QUANTITY_LINE.captures(text) else {
                continue;
            };

            let window_end = (i + 1 + self.lookahead).min(lines.len());
            let Some(code_index) = lines[i + 1..window_end]
                .iter()
                .position(|l| WF_ITEM_CODE.is_match(&l.text))
                .map(|offset| i + 1 + offset)
            else {
                diagnostics.skip(line, SkipReason::OrphanQuantity);
                continue;
            };

            let quantity = match caps[3].parse::<u32>() {
                Ok(q) if q > 0 => q,
                _ => {
                    diagnostics.skip(line, SkipReason::NonPositiveQuantity);
                    continue;
                }
            };

            let code_line = &lines[code_index];
            let Some(item_code) = WF_ITEM_CODE.find(&code_line.text).map(|m| m.as_str()) else {
                continue;
            };

            let description_end = (code_index + self.description_lines).min(lines.len());
            let description = lines[code_index..description_end]
                .iter()
                .map(|l| l.text.trim())
                .filter(|t| {
                    !WF_ITEM_CODE.is_match(t)
                        && !WF_QUANTITY_LINE.is_match(t)
                        && !WF_BOILERPLATE.is_match(t)
                })
                .collect::<Vec<_>>()
                .join(" ");

            let color = self.derive_color(item_code, &description);
            if color.is_empty() {
                diagnostics.skip(code_line, SkipReason::EmptyColor);
                continue;
            }

            items.push(ParsedItem::new(
                item_code,
                color,
                derive_size(item_code, &description),
                quantity,
            ));
        }
    }

    fn derive_color(&self, item_code: &str, description: &str) -> String {
        let cleaned = self.cleaner.clean(description, item_code);
        let named = NamingRule::for_code(item_code).name(item_code, &cleaned);

        let color = if MID_TONE.is_match(&named) {
            "Mid-tone Greywash".to_string()
        } else if named.is_empty() {
            friendly_name(item_code)
        } else {
            named
        };

        strip_trailing_number(&finish(&color)).trim().to_string()
    }
}

impl VendorGrammar for WorldFamousGrammar {
    fn vendor(&self) -> Vendor {
        Vendor::WorldFamous
    }

    fn extract(&self, lines: &[Line], diagnostics: &mut Diagnostics) -> Vec<ParsedItem> {
        let mut items = Vec::new();
        for page in lines.chunk_by(|a, b| a.page == b.page) {
            let before = items.len();
            self.extract_page(page, &mut items, diagnostics);
            debug!(
                "World Famous page {}: {} items from {} lines",
                page[0].page,
                items.len() - before,
                page.len()
            );
        }
        items
    }
}

/// Size from the SKU, falling back to the description, then `1oz`.
fn derive_size(item_code: &str, description: &str) -> String {
    let raw = kuro_sumi_size(item_code)
        .map(str::to_string)
        .or_else(|| item_code.contains("1/2").then(|| "1/2oz".to_string()))
        .or_else(|| {
            item_code
                .chars()
                .last()
                .filter(|c| matches!(c, '2' | '4'))
                .map(|c| format!("{}oz", c))
        })
        .or_else(|| description_size(description))
        .unwrap_or_else(|| "1oz".to_string());

    normalize_size(&raw)
}

/// Kuro Sumi bottle sizes encoded in the SKU.
fn kuro_sumi_size(item_code: &str) -> Option<&'static str> {
    let rest = item_code.strip_prefix("KS")?;
    if rest.contains("OL6") || rest.contains("G6") {
        Some("6oz")
    } else if rest.contains("OI12") {
        Some("12oz")
    } else if rest.contains("SW1.5") {
        Some("1.5oz")
    } else if rest.contains("SW3") {
        Some("3oz")
    } else {
        None
    }
}

fn description_size(description: &str) -> Option<String> {
    let caps = WF_DESCRIPTION_SIZE.captures(description)?;
    Some(match caps.get(2) {
        Some(denominator) => format!("{}/{}oz", &caps[1], denominator.as_str()),
        None => format!("{}oz", &caps[1]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(texts: &[&str]) -> (Vec<ParsedItem>, Diagnostics) {
        let grammar = WorldFamousGrammar::new(3, 3);
        let mut diagnostics = Diagnostics::new(true);
        let items = grammar.extract(&Line::from_texts(texts.iter().copied()), &mut diagnostics);
        (items, diagnostics)
    }

    #[test]
    fn test_kuro_sumi_greywash() {
        let (items, _) = parse(&["0 0 10 $9.25 $92.50", "KSG6", "Kuro Sumi Greywash"]);
        assert_eq!(items, vec![ParsedItem::new("KSG6", "Kuro Sumi Greywash", "6oz", 10)]);
    }

    #[test]
    fn test_world_famous_order() {
        let (items, diagnostics) = parse(&[
            "Sales Order SO-1042",
            "Qty Fulfilled Ordered Quantity Rate Amount",
            "0 0 2 $9.25 $18.50",
            "WFBB2",
            "World Famous Tattoo Ink - Blue Black",
            "0 0 6 $11.00 $66.00",
            "WFMDGW4",
            "World Famous Mid-tone Greywash 4oz",
            "0 0 1 $4.75 $4.75",
            "WFPW1/2",
            "World Famous",
            "Subtotal $89.25",
        ]);
        assert_eq!(
            items,
            vec![
                ParsedItem::new("WFBB2", "Blue Black", "2oz", 2),
                ParsedItem::new("WFMDGW4", "Mid-tone Greywash", "4oz", 6),
                ParsedItem::new("WFPW1/2", "Portrait White", "0.5oz", 1),
            ]
        );
        let boilerplate = diagnostics
            .entries()
            .iter()
            .filter(|d| d.reason == SkipReason::Boilerplate)
            .count();
        assert_eq!(boilerplate, 3);
    }

    #[test]
    fn test_samurai_white_sizes() {
        let (items, _) = parse(&[
            "0 0 3 $20.00 $60.00",
            "KSSW1.5",
            "Kuro Sumi Samurai White",
            "0 0 1 $30.00 $30.00",
            "KSSW3",
            "Samurai White",
        ]);
        assert_eq!(items[0].size, "1.5oz");
        assert_eq!(items[0].color, "Kuro Sumi Samurai White");
        assert_eq!(items[1].size, "3oz");
    }

    #[test]
    fn test_pancho_pastel_and_sets() {
        let (items, _) = parse(&[
            "0 0 4 $9.00 $36.00",
            "WFADPP07",
            "Pancho Pastel 07 1oz",
            "0 0 1 $120.00 $120.00",
            "WFMHS",
            "Must-Haves 6 Bottle Ink Set",
        ]);
        assert_eq!(items[0].color, "Pancho Pastel #07");
        assert_eq!(items[0].size, "1oz");
        assert_eq!(items[1].color, "World Famous Must-Haves 6 Bottle Ink Set");
    }

    #[test]
    fn test_orphan_quantity_is_reported() {
        let (items, diagnostics) = parse(&[
            "0 0 5 $9.25 $46.25",
            "Blue",
            "Black",
            "Lining",
            "WFBB2",
            "0 0 1 $9.25 $9.25",
            "WFLW",
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_code, "WFLW");
        assert_eq!(items[0].color, "Lining White");
        assert_eq!(diagnostics.entries()[0].reason, SkipReason::OrphanQuantity);
    }

    #[test]
    fn test_subtotal_stays_out_of_description() {
        let (items, diagnostics) =
            parse(&["0 0 1 $4.75 $4.75", "WFPW1/2", "World Famous", "Subtotal $89.25"]);
        assert_eq!(
            items,
            vec![ParsedItem::new("WFPW1/2", "Portrait White", "0.5oz", 1)]
        );
        assert_eq!(diagnostics.entries()[0].reason, SkipReason::Boilerplate);
        assert_eq!(diagnostics.entries()[0].line, "Subtotal $89.25");
    }

    #[test]
    fn test_code_on_last_lookahead_line() {
        let (items, diagnostics) = parse(&["0 0 4 $9.25 $37.00", "Tattoo", "Ink", "WFBB2"]);
        assert_eq!(items, vec![ParsedItem::new("WFBB2", "Blue Black", "2oz", 4)]);
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn test_zero_quantity_excluded() {
        let (items, diagnostics) = parse(&["0 0 0 $9.25 $0.00", "WFBB2", "Blue Black"]);
        assert!(items.is_empty());
        assert_eq!(diagnostics.entries()[0].reason, SkipReason::NonPositiveQuantity);
    }

    #[test]
    fn test_pages_are_scanned_separately() {
        let mut lines = Line::from_texts(["0 0 2 $9.25 $18.50"]);
        lines.push(Line::new(2, 700.0, "WFBB2"));
        lines.push(Line::new(2, 690.0, "Blue Black"));
        let grammar = WorldFamousGrammar::new(3, 3);
        let mut diagnostics = Diagnostics::new(true);
        let items = grammar.extract(&lines, &mut diagnostics);
        assert!(items.is_empty());
        assert_eq!(diagnostics.entries()[0].reason, SkipReason::OrphanQuantity);
    }

    #[test]
    fn test_derive_size_precedence() {
        assert_eq!(derive_size("KSOL6", "1oz"), "6oz");
        assert_eq!(derive_size("KSOI12", ""), "12oz");
        assert_eq!(derive_size("WFBB4", "2oz"), "4oz");
        assert_eq!(derive_size("WFPW", "Portrait White 8 oz"), "8oz");
        assert_eq!(derive_size("WFPW", "Portrait White 1/2 oz"), "0.5oz");
        assert_eq!(derive_size("WFPW", "Portrait White"), "1oz");
    }
}
