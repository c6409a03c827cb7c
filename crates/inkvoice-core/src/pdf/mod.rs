//! Text extraction backends.
//!
//! The engine never reads PDF bytes itself. A [`TextExtractor`] turns the
//! document into positioned fragments one page at a time; pages may arrive
//! in any order.

#[cfg(feature = "native")]
mod extractor;

#[cfg(feature = "native")]
pub use extractor::PdfTextExtractor;

use futures_util::stream::{self, LocalBoxStream, StreamExt};

use crate::error::PdfError;
use crate::models::document::Page;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for text-extraction backends.
pub trait TextExtractor {
    /// Stream the pages of `data`, each with its positioned fragments.
    fn extract_pages<'a>(&'a self, data: &'a [u8]) -> LocalBoxStream<'a, Result<Page>>;
}

/// Extractor over pages that were extracted elsewhere (pdf.js, a JSON dump).
///
/// The document bytes are ignored; pages are yielded in the order given.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Vec<Page>,
}

impl StaticPages {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

impl TextExtractor for StaticPages {
    fn extract_pages<'a>(&'a self, _data: &'a [u8]) -> LocalBoxStream<'a, Result<Page>> {
        stream::iter(self.pages.iter().cloned().map(Ok)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::TextFragment;
    use futures_util::TryStreamExt;

    #[tokio::test]
    async fn test_static_pages_keep_given_order() {
        let extractor = StaticPages::new(vec![
            Page::new(2, vec![TextFragment::new("b", 0.0, 0.0, 0)]),
            Page::new(1, vec![TextFragment::new("a", 0.0, 0.0, 0)]),
        ]);
        let pages: Vec<Page> = extractor.extract_pages(&[]).try_collect().await.unwrap();
        let indexes: Vec<u32> = pages.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![2, 1]);
        assert_eq!(pages[0].fragments[0].page, 2);
    }
}
