//! Error types for the inkvoice-core library.

use thiserror::Error;

use crate::models::vendor::Vendor;

/// Main error type for the inkvoice library.
#[derive(Error, Debug)]
pub enum InkvoiceError {
    /// Parsing finished but no line matched the vendor grammar.
    #[error("no items could be parsed from the {vendor} invoice")]
    NoItemsFound { vendor: Vendor },

    /// The vendor selector does not name a known grammar.
    #[error("unsupported vendor: {0}")]
    UnsupportedVendor(String),

    /// The text-extraction step rejected the document.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] PdfError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoItemsFound,
    UnsupportedVendor,
    MalformedInput,
    Config,
    Io,
}

impl InkvoiceError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoItemsFound { .. } => ErrorKind::NoItemsFound,
            Self::UnsupportedVendor(_) => ErrorKind::UnsupportedVendor,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Errors raised by a text-extraction backend.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// A page content stream could not be decoded.
    #[error("failed to decode content of page {page}: {reason}")]
    Content { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Fragments were handed over in a shape the engine cannot use.
    #[error("invalid page data: {0}")]
    InvalidPage(String),
}

/// Result type for the inkvoice library.
pub type Result<T> = std::result::Result<T, InkvoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = InkvoiceError::NoItemsFound {
            vendor: Vendor::SolidInk,
        };
        assert_eq!(err.kind(), ErrorKind::NoItemsFound);
        assert_eq!(
            err.to_string(),
            "no items could be parsed from the solidInk invoice"
        );

        let err: InkvoiceError = PdfError::NoPages.into();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.to_string(), "malformed input: PDF has no pages");
    }
}
