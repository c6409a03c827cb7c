//! Data models for fragments, lines, parsed items and configuration.

pub mod config;
pub mod document;
pub mod item;
pub mod vendor;

pub use config::{ExtractionConfig, InkvoiceConfig, LayoutConfig};
pub use document::{Line, Page, TextFragment};
pub use item::{Diagnostic, ParseResult, ParsedItem, SkipReason};
pub use vendor::Vendor;
