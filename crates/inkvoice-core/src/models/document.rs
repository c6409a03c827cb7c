//! Positioned text as delivered by a text-extraction backend.

use serde::{Deserialize, Serialize};

/// A run of text at a page coordinate.
///
/// `(x, y)` is the baseline origin in page space: origin bottom-left,
/// y increasing upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Text content as rendered.
    pub text: String,
    /// Horizontal baseline origin.
    pub x: f64,
    /// Vertical baseline origin.
    pub y: f64,
    /// Page index (1-based).
    #[serde(default)]
    pub page: u32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64, page: u32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            page,
        }
    }
}

/// One page worth of fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (1-based).
    pub index: u32,
    /// Fragments in no particular order.
    pub fragments: Vec<TextFragment>,
}

impl Page {
    /// Build a page, stamping every fragment with the page index.
    pub fn new(index: u32, fragments: Vec<TextFragment>) -> Self {
        let fragments = fragments
            .into_iter()
            .map(|mut fragment| {
                fragment.page = index;
                fragment
            })
            .collect();
        Self { index, fragments }
    }
}

/// A reconstructed logical line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Page the line belongs to.
    pub page: u32,
    /// Representative baseline of the cluster.
    pub y: f64,
    /// Fragments joined left to right with single spaces.
    pub text: String,
}

impl Line {
    pub fn new(page: u32, y: f64, text: impl Into<String>) -> Self {
        Self {
            page,
            y,
            text: text.into(),
        }
    }

    /// Build page-1 lines from plain strings, top to bottom.
    ///
    /// Handy for feeding hand-written invoice text straight into a grammar.
    pub fn from_texts<I, S>(texts: I) -> Vec<Line>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line::new(1, -(i as f64), text))
            .collect()
    }
}
