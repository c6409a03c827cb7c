//! Stock-line records produced by the vendor grammars.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized invoice line, ready to be merged into stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    /// Supplier SKU as printed on the invoice.
    pub item_code: String,
    /// Ink color or product name.
    pub color: String,
    /// Canonical size (`1oz`, `0.5oz`, `30mm`, ...).
    pub size: String,
    /// Ordered quantity, always positive.
    pub quantity: u32,
}

impl ParsedItem {
    pub fn new(
        item_code: impl Into<String>,
        color: impl Into<String>,
        size: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            color: color.into(),
            size: size.into(),
            quantity,
        }
    }
}

/// Items in invoice order. Duplicates are kept.
pub type ParseResult = Vec<ParsedItem>;

/// Why a line contributed nothing to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Header, footer, page marker or invoice metadata.
    Boilerplate,
    /// Line did not fit the vendor grammar.
    Unmatched,
    /// Quantity line with no item code inside the lookahead window.
    OrphanQuantity,
    /// Quantity parsed as zero or did not fit.
    NonPositiveQuantity,
    /// Discount row.
    Discount,
    /// Nothing left of the description after cleanup.
    EmptyColor,
    /// Description was only a unit word (`ounce`, `Bottle`).
    PlaceholderColor,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Boilerplate => "boilerplate",
            Self::Unmatched => "unmatched",
            Self::OrphanQuantity => "quantity without item code",
            Self::NonPositiveQuantity => "non-positive quantity",
            Self::Discount => "discount",
            Self::EmptyColor => "empty color",
            Self::PlaceholderColor => "placeholder color",
        };
        f.write_str(s)
    }
}

/// A recoverable skip, reported next to the parsed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Page of the skipped line.
    pub page: u32,
    /// Line text.
    pub line: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl Diagnostic {
    pub fn new(page: u32, line: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            page,
            line: line.into(),
            reason,
        }
    }
}
