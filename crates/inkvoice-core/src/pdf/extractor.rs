//! Positioned text extraction using lopdf.

use std::collections::BTreeMap;

use futures_util::future;
use futures_util::stream::{self, LocalBoxStream, StreamExt};
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;
use crate::models::document::{Page, TextFragment};

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Kerning adjustment (thousandths of an em) wide enough to read as a space.
const TJ_SPACE_THRESHOLD: f32 = -250.0;

/// Text extractor walking page content streams.
///
/// Every shown string becomes one fragment placed at the text origin in
/// effect when it was drawn, mapped through the current transformation
/// matrix into page space. Glyph widths are not measured, so strings drawn
/// back to back without repositioning share an x coordinate and keep their
/// drawing order.
///
/// Strings are decoded through the encoding of the font selected with `Tf`
/// (including `ToUnicode` maps of Identity-H fonts). When the font is
/// unknown or its encoding unsupported, bytes are read as UTF-16BE if
/// BOM-prefixed and Latin-1 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Load a document, decrypting it with the empty password if needed.
    pub fn load(&self, data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(doc)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_pages<'a>(&'a self, data: &'a [u8]) -> LocalBoxStream<'a, Result<Page>> {
        let doc = match self.load(data) {
            Ok(doc) => doc,
            Err(e) => return stream::once(future::ready(Err(e))).boxed_local(),
        };

        let page_ids: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        stream::iter(page_ids)
            .map(move |(index, page_id)| extract_page(&doc, index, page_id))
            .boxed_local()
    }
}

fn extract_page(doc: &Document, index: u32, page_id: ObjectId) -> Result<Page> {
    let content_error = |reason: String| PdfError::Content {
        page: index,
        reason,
    };

    let raw = doc
        .get_page_content(page_id)
        .map_err(|e| content_error(e.to_string()))?;
    let content = Content::decode(&raw).map_err(|e| content_error(e.to_string()))?;

    let fonts = FontEncodings::for_page(doc, page_id);
    let mut graphics = GraphicsState::default();
    let mut saved: Vec<GraphicsState> = Vec::new();
    let mut state = TextState::default();
    let mut fragments = Vec::new();

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => saved.push(graphics.clone()),
            "Q" => {
                if let Some(previous) = saved.pop() {
                    graphics = previous;
                }
            }
            "cm" => {
                if let Some(matrix) = matrix(operands) {
                    graphics.ctm = multiply(&matrix, &graphics.ctm);
                }
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    graphics.font = Some(name.clone());
                }
            }
            "BT" => {
                state.text_matrix = IDENTITY;
                state.line_matrix = IDENTITY;
            }
            "Tm" => {
                if let Some(matrix) = matrix(operands) {
                    state.text_matrix = matrix;
                    state.line_matrix = matrix;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (operand(operands, 0), operand(operands, 1)) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (operand(operands, 0), operand(operands, 1)) {
                    graphics.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "TL" => {
                if let Some(leading) = operand(operands, 0) {
                    graphics.leading = leading;
                }
            }
            "T*" => state.next_line(graphics.leading),
            "Tj" => {
                if let Some(text) = operands.first().and_then(|o| fonts.string(&graphics, o)) {
                    fragments.push(state.fragment(text, &graphics.ctm));
                }
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = operands.first() {
                    let text = fonts.join_tj(&graphics, parts);
                    fragments.push(state.fragment(text, &graphics.ctm));
                }
            }
            "'" => {
                state.next_line(graphics.leading);
                if let Some(text) = operands.first().and_then(|o| fonts.string(&graphics, o)) {
                    fragments.push(state.fragment(text, &graphics.ctm));
                }
            }
            "\"" => {
                state.next_line(graphics.leading);
                if let Some(text) = operands.get(2).and_then(|o| fonts.string(&graphics, o)) {
                    fragments.push(state.fragment(text, &graphics.ctm));
                }
            }
            _ => {}
        }
    }

    trace!("Page {}: {} fragments", index, fragments.len());
    Ok(Page::new(index, fragments))
}

/// The parts of the graphics state saved by `q` and restored by `Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: [f32; 6],
    font: Option<Vec<u8>>,
    leading: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            font: None,
            leading: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextState {
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
        }
    }
}

impl TextState {
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let m = self.line_matrix;
        self.line_matrix[4] = m[0] * tx + m[2] * ty + m[4];
        self.line_matrix[5] = m[1] * tx + m[3] * ty + m[5];
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate_line(0.0, -leading);
    }

    /// Fragment at the text origin, in page space.
    fn fragment(&self, text: String, ctm: &[f32; 6]) -> TextFragment {
        let [x, y] = transform(self.text_matrix[4], self.text_matrix[5], ctm);
        TextFragment::new(text, f64::from(x), f64::from(y), 0)
    }
}

/// Encodings of the fonts a page's resources declare, keyed by resource name.
struct FontEncodings<'a> {
    encodings: BTreeMap<Vec<u8>, Encoding<'a>>,
}

impl<'a> FontEncodings<'a> {
    fn for_page(doc: &'a Document, page_id: ObjectId) -> Self {
        let fonts = match doc.get_page_fonts(page_id) {
            Ok(fonts) => fonts,
            Err(e) => {
                debug!("No font resources for page {:?}: {}", page_id, e);
                BTreeMap::new()
            }
        };

        let encodings = fonts
            .into_iter()
            .filter_map(|(name, font)| match font.get_font_encoding(doc) {
                Ok(encoding) => Some((name, encoding)),
                Err(e) => {
                    debug!("Font {}: {}", String::from_utf8_lossy(&name), e);
                    None
                }
            })
            .collect();

        Self { encodings }
    }

    fn decode(&self, graphics: &GraphicsState, bytes: &[u8]) -> String {
        graphics
            .font
            .as_ref()
            .and_then(|name| self.encodings.get(name))
            .and_then(|encoding| Document::decode_text(encoding, bytes).ok())
            .unwrap_or_else(|| decode_text(bytes))
    }

    fn string(&self, graphics: &GraphicsState, obj: &Object) -> Option<String> {
        match obj {
            Object::String(bytes, _) => Some(self.decode(graphics, bytes)),
            _ => None,
        }
    }

    fn join_tj(&self, graphics: &GraphicsState, parts: &[Object]) -> String {
        let mut text = String::new();
        for part in parts {
            match part {
                Object::String(bytes, _) => text.push_str(&self.decode(graphics, bytes)),
                other => {
                    if number(other).is_some_and(|adjust| adjust < TJ_SPACE_THRESHOLD) {
                        text.push(' ');
                    }
                }
            }
        }
        text
    }
}

/// `m × n` for PDF's row-vector affine matrices.
fn multiply(m: &[f32; 6], n: &[f32; 6]) -> [f32; 6] {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

fn transform(x: f32, y: f32, m: &[f32; 6]) -> [f32; 2] {
    [x * m[0] + y * m[2] + m[4], x * m[1] + y * m[3] + m[5]]
}

fn matrix(operands: &[Object]) -> Option<[f32; 6]> {
    let values: Vec<f32> = operands.iter().filter_map(number).collect();
    <[f32; 6]>::try_from(values.as_slice()).ok()
}

fn operand(operands: &[Object], i: usize) -> Option<f32> {
    operands.get(i).and_then(number)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// UTF-16BE when BOM-prefixed, Latin-1 otherwise.
fn decode_text(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE_u8, 0xFF][..]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"Lining Black"), "Lining Black");
        assert_eq!(decode_text(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0xE9]), "A\u{e9}");
        assert_eq!(decode_text(&[0x4D, 0xE9]), "M\u{e9}");
    }

    #[test]
    fn test_translate_line_follows_matrix() {
        let mut state = TextState::default();
        state.text_matrix = [2.0, 0.0, 0.0, 2.0, 10.0, 700.0];
        state.line_matrix = state.text_matrix;
        state.translate_line(5.0, -6.0);
        assert_eq!(state.text_matrix[4], 20.0);
        assert_eq!(state.text_matrix[5], 688.0);
    }

    #[test]
    fn test_join_tj_inserts_wide_gaps() {
        let parts = vec![
            Object::string_literal("KS"),
            Object::Integer(-20),
            Object::string_literal("G6"),
            Object::Real(-400.0),
            Object::string_literal("Greywash"),
        ];
        let fonts = FontEncodings {
            encodings: BTreeMap::new(),
        };
        assert_eq!(
            fonts.join_tj(&GraphicsState::default(), &parts),
            "KSG6 Greywash"
        );
    }

    #[test]
    fn test_flipped_ctm_maps_back_to_page_space() {
        let flip = [1.0, 0.0, 0.0, -1.0, 0.0, 792.0];
        let ctm = multiply(&flip, &IDENTITY);
        assert_eq!(transform(40.0, 92.0, &ctm), [40.0, 700.0]);

        let mut state = TextState::default();
        state.text_matrix = [1.0, 0.0, 0.0, -1.0, 40.0, 104.0];
        let fragment = state.fragment("KSG6".to_string(), &ctm);
        assert_eq!((fragment.x, fragment.y), (40.0, 688.0));
    }

    #[test]
    fn test_cm_concatenates_onto_current_matrix() {
        let scale = [2.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let shift = [1.0, 0.0, 0.0, 1.0, 10.0, 20.0];
        // `shift cm` applied after `scale cm`: shift is in scaled space.
        let ctm = multiply(&shift, &multiply(&scale, &IDENTITY));
        assert_eq!(transform(0.0, 0.0, &ctm), [20.0, 40.0]);
        assert_eq!(transform(1.0, 1.0, &ctm), [22.0, 42.0]);
    }

    #[test]
    fn test_unknown_font_falls_back_to_raw_bytes() {
        let fonts = FontEncodings {
            encodings: BTreeMap::new(),
        };
        let graphics = GraphicsState {
            font: Some(b"F9".to_vec()),
            ..GraphicsState::default()
        };
        let text = fonts.string(&graphics, &Object::string_literal("WFBB2"));
        assert_eq!(text.as_deref(), Some("WFBB2"));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = PdfTextExtractor::new().load(b"not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
