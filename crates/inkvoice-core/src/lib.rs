//! Core library for tattoo-ink supplier invoices.
//!
//! This crate provides:
//! - Line reconstruction from positioned PDF text fragments
//! - Vendor grammars for World Famous / Kuro Sumi, Eternal and Solid Ink
//! - Size and color normalization for stock matching
//! - PDF text extraction with lopdf (`native` feature)

pub mod error;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod pdf;
pub mod vendors;

pub use error::{ErrorKind, InkvoiceError, PdfError, Result};
pub use layout::{reconstruct, reconstruct_pages, LineGrouping};
pub use models::{
    Diagnostic, ExtractionConfig, InkvoiceConfig, LayoutConfig, Line, Page, ParseResult,
    ParsedItem, SkipReason, TextFragment, Vendor,
};
pub use normalize::normalize_size;
pub use parser::{InvoiceParser, ParseOutcome};
pub use pdf::{StaticPages, TextExtractor};
#[cfg(feature = "native")]
pub use pdf::PdfTextExtractor;
pub use vendors::{grammar_for, Diagnostics, VendorGrammar};
