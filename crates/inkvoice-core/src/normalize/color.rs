//! Description cleanup shared by the vendor color derivations.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CURRENCY: Regex = Regex::new(r"\$[\d,.]+").unwrap();

    static ref FRACTIONAL_SIZE: Regex =
        Regex::new(r"(?i)\d+\s*/\s*\d+\s*(?:oz\b\.?|ounces?\b)").unwrap();

    static ref PLAIN_SIZE: Regex =
        Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:oz\b\.?|ounces?\b)").unwrap();

    static ref PAGE_MARKER: Regex = Regex::new(r"\d+\s+of\s+\d+").unwrap();

    static ref TRAILING_FRACTION: Regex = Regex::new(r"\d+\s*/\s*$").unwrap();

    static ref PARENTHETICAL: Regex = Regex::new(r"\s*\([^)]*\)").unwrap();

    static ref DASHES: Regex = Regex::new(r"[-\u{2013}\u{2014}]").unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    static ref TRAILING_PUNCTUATION: Regex =
        Regex::new(r"[\s,;:|\-\u{2013}\u{2014}]+$").unwrap();

    static ref TRAILING_NUMBER: Regex = Regex::new(r"\s+\d+\s*$").unwrap();
}

/// Configurable description cleaner.
///
/// Every vendor derives a color from a free-text description by removing
/// the item code, prices, sizes and marketing words. What differs is which
/// words count as boilerplate and whether dashes separate words.
#[derive(Debug, Clone)]
pub struct ColorCleaner {
    strip_words: Vec<Regex>,
    truncate_at: Vec<Regex>,
    dashes_as_spaces: bool,
    strip_parentheticals: bool,
}

impl ColorCleaner {
    /// Create a cleaner that only applies the shared steps.
    pub fn new() -> Self {
        Self {
            strip_words: Vec::new(),
            truncate_at: Vec::new(),
            dashes_as_spaces: false,
            strip_parentheticals: false,
        }
    }

    /// Remove these words or phrases wherever they appear as whole words.
    ///
    /// Phrases are applied in the given order, so list longer phrases
    /// (`Tattoo Ink`) before their parts (`Ink`).
    pub fn with_strip_words(mut self, words: &[&str]) -> Self {
        self.strip_words = words.iter().map(|w| word_pattern(w)).collect();
        self
    }

    /// Drop everything from the first of these words onward.
    pub fn with_truncate_at(mut self, words: &[&str]) -> Self {
        self.truncate_at = words.iter().map(|w| word_pattern(w)).collect();
        self
    }

    /// Treat hyphens and dashes as word separators.
    pub fn with_dashes_as_spaces(mut self, enabled: bool) -> Self {
        self.dashes_as_spaces = enabled;
        self
    }

    /// Remove `(...)` notes.
    pub fn with_strip_parentheticals(mut self, enabled: bool) -> Self {
        self.strip_parentheticals = enabled;
        self
    }

    /// Clean `description`, removing the first occurrence of `item_code`.
    pub fn clean(&self, description: &str, item_code: &str) -> String {
        let mut text = if item_code.is_empty() {
            description.to_string()
        } else {
            description.replacen(item_code, "", 1)
        };

        text = CURRENCY.replace_all(&text, "").into_owned();
        text = FRACTIONAL_SIZE.replace_all(&text, "").into_owned();
        text = PLAIN_SIZE.replace_all(&text, "").into_owned();
        text = PAGE_MARKER.replace_all(&text, "").into_owned();
        text = TRAILING_FRACTION.replace(&text, "").into_owned();

        if self.strip_parentheticals {
            text = PARENTHETICAL.replace_all(&text, "").into_owned();
        }

        for word in &self.truncate_at {
            if let Some(m) = word.find(&text) {
                text.truncate(m.start());
            }
        }

        if self.dashes_as_spaces {
            text = DASHES.replace_all(&text, " ").into_owned();
        }

        for word in &self.strip_words {
            text = word.replace_all(&text, "").into_owned();
        }

        finish(&text)
    }
}

impl Default for ColorCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse whitespace, then strip trailing punctuation and dashes.
pub fn finish(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    TRAILING_PUNCTUATION
        .replace(&collapsed, "")
        .trim()
        .to_string()
}

/// Replace every whitespace run with a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Remove a bare number left dangling at the end of a name.
pub fn strip_trailing_number(text: &str) -> String {
    TRAILING_NUMBER.replace(text, "").into_owned()
}

fn word_pattern(word: &str) -> Regex {
    let escaped = regex::escape(word.trim());
    Regex::new(&format!(r"\b{}\b", escaped)).expect("escaped literal is a valid pattern")
}
