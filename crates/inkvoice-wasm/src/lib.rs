//! WASM bindings for tattoo-ink supplier invoices.
//!
//! The browser does its own PDF text extraction (pdf.js or similar) and hands
//! the positioned fragments over as plain objects:
//! `[{ index: 1, fragments: [{ text, x, y }] }]`.

use wasm_bindgen::prelude::*;

use inkvoice_core::{InkvoiceConfig, InvoiceParser, Page, Vendor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse pre-extracted pages into stock lines with the default configuration.
#[wasm_bindgen]
pub fn parse_pages(vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
    InvoiceReader::new().parse(vendor, pages)
}

/// Parse pre-extracted pages and return items, diagnostics and timing.
#[wasm_bindgen]
pub fn parse_pages_with_diagnostics(vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
    InvoiceReader::new().parse_with_diagnostics(vendor, pages)
}

/// Reconstruct the lines a vendor grammar would see.
#[wasm_bindgen]
pub fn reconstruct_lines(vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
    InvoiceReader::new().lines(vendor, pages)
}

/// Canonical form of a size string (`"1/2 oz"` becomes `"0.5oz"`).
#[wasm_bindgen]
pub fn normalize_size(size: &str) -> String {
    inkvoice_core::normalize_size(size)
}

/// Names of the supported vendors, as accepted by the parse functions.
#[wasm_bindgen]
pub fn supported_vendors() -> Vec<String> {
    Vendor::ALL.iter().map(|v| v.id().to_string()).collect()
}

/// Invoice reader class for browser use.
#[wasm_bindgen]
pub struct InvoiceReader {
    parser: InvoiceParser,
}

#[wasm_bindgen]
impl InvoiceReader {
    /// Create a reader with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: InvoiceParser::new(InkvoiceConfig::default()),
        }
    }

    /// Create a reader from a configuration object. Missing fields keep
    /// their defaults.
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<InvoiceReader, JsValue> {
        let config: InkvoiceConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            parser: InvoiceParser::new(config),
        })
    }

    /// Parse pages into the item list.
    #[wasm_bindgen]
    pub fn parse(&self, vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
        let (vendor, pages) = decode_input(vendor, pages)?;
        let outcome = self
            .parser
            .parse_pages(vendor, &pages)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&outcome.items)
    }

    /// Parse pages into the full outcome.
    #[wasm_bindgen]
    pub fn parse_with_diagnostics(&self, vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
        let (vendor, pages) = decode_input(vendor, pages)?;
        let outcome = self
            .parser
            .parse_pages(vendor, &pages)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&outcome)
    }

    /// Reconstructed lines for the vendor's grouping mode.
    #[wasm_bindgen]
    pub fn lines(&self, vendor: &str, pages: JsValue) -> Result<JsValue, JsValue> {
        let (vendor, pages) = decode_input(vendor, pages)?;
        to_js(&self.parser.reconstruct(vendor, &pages))
    }
}

impl Default for InvoiceReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_input(vendor: &str, pages: JsValue) -> Result<(Vendor, Vec<Page>), JsValue> {
    let vendor: Vendor = vendor
        .parse()
        .map_err(|e: inkvoice_core::InkvoiceError| JsValue::from_str(&e.to_string()))?;

    let pages: Vec<Page> = serde_wasm_bindgen::from_value(pages)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Fragments coming from JS rarely carry their page index.
    let pages = pages
        .into_iter()
        .map(|page| Page::new(page.index, page.fragments))
        .collect();

    Ok((vendor, pages))
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_normalize_size() {
        assert_eq!(normalize_size("1/2 ounce"), "0.5oz");
        assert_eq!(normalize_size("2 Ounces"), "2oz");
    }

    #[wasm_bindgen_test]
    fn test_supported_vendors() {
        assert_eq!(
            supported_vendors(),
            vec!["worldFamous", "eternal", "solidInk"]
        );
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
