//! Positioned text extraction.
//!
//! Walks a page's content stream and records every shown string together
//! with its text-space origin, which is what table detection works from.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Average glyph width as a fraction of the font size, used to estimate
/// span widths when font metrics are not consulted.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// TJ adjustments beyond this (in thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A run of text with its position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span, estimating its width from the character count.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Extracts [`TextSpan`]s from the pages of a loaded document.
pub struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract all non-blank spans shown on the page.
    pub fn extract_page_spans(&self, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.doc.get_page_content(page_id)?;
        self.parse_content_stream(&content, &fonts)
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let encodings: BTreeMap<Vec<u8>, _> = fonts
            .iter()
            .filter_map(|(name, font)| {
                font.get_font_encoding(self.doc)
                    .ok()
                    .map(|enc| (name.clone(), enc))
            })
            .collect();

        let mut spans = Vec::new();
        let mut font_name: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix.reset();
                }
                "ET" => in_text_block = false,
                "Tf" if operands.len() >= 2 => {
                    if let Object::Name(name) = &operands[0] {
                        font_name = name.clone();
                    }
                    font_size = get_number(&operands[1]).unwrap_or(12.0);
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" if operands.len() >= 2 => {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
                "Tm" if operands.len() >= 6 => {
                    let n: Vec<f32> = operands[..6]
                        .iter()
                        .map(|o| get_number(o).unwrap_or(0.0))
                        .collect();
                    matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let decode = |bytes: &[u8]| match encodings.get(&font_name) {
                        Some(enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
                        None => decode_text_simple(bytes),
                    };

                    let text = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => decode_tj_array(items, &decode),
                            _ => String::new(),
                        },
                        "\"" => match operands.get(2) {
                            Some(Object::String(bytes, _)) => decode(bytes),
                            _ => String::new(),
                        },
                        _ => match operands.first() {
                            Some(Object::String(bytes, _)) => decode(bytes),
                            _ => String::new(),
                        },
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        spans.push(TextSpan::new(text, x, y, font_size * matrix.scale()));
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

/// Concatenate the strings of a TJ array, inserting a space where a large
/// negative adjustment separates two words.
fn decode_tj_array(items: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            other => {
                let Some(adjustment) = get_number(other) else {
                    continue;
                };
                if -adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined.chars().last().is_some_and(is_spaceless_script_char)
                {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    /// BT resets the matrix but leading is part of the graphics state.
    fn reset(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Chinese and Japanese text does not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF     // CJK Unified Ideographs
        | 0x3400..=0x4DBF   // Extension A
        | 0x20000..=0x2EBEF // Extensions B-F
        | 0x3040..=0x30FF   // Hiragana, Katakana
        | 0x3000..=0x303F   // CJK punctuation
    )
}

/// Decode a string without font encoding information.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_width_estimate() {
        let span = TextSpan::new("Kano", 100.0, 700.0, 10.0);
        assert_eq!(span.width, 20.0);
        assert_eq!(span.right(), 120.0);
    }

    #[test]
    fn test_text_matrix_translate_and_leading() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        assert_eq!(m.position(), (72.0, 700.0));

        m.leading = 14.0;
        m.next_line();
        assert_eq!(m.position(), (72.0, 686.0));

        m.reset();
        assert_eq!(m.position(), (0.0, 0.0));
        assert_eq!(m.leading, 14.0);
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 10.0, 20.0);
        assert_eq!(m.scale(), 2.0);
        m.translate(5.0, 0.0);
        assert_eq!(m.position(), (20.0, 20.0));
    }

    #[test]
    fn test_tj_array_word_gaps() {
        let decode = |b: &[u8]| String::from_utf8_lossy(b).to_string();
        let items = vec![
            Object::string_literal("Total"),
            Object::Integer(-250),
            Object::string_literal("cases"),
            Object::Integer(-40),
            Object::string_literal("!"),
        ];
        assert_eq!(decode_tj_array(&items, &decode), "Total cases!");
    }

    #[test]
    fn test_tj_array_cjk_no_space() {
        let decode = |b: &[u8]| String::from_utf8_lossy(b).to_string();
        let items = vec![
            Object::string_literal("東京"),
            Object::Real(-300.0),
            Object::string_literal("都"),
        ];
        assert_eq!(decode_tj_array(&items, &decode), "東京都");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_parse_content_stream_positions() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = SpanExtractor::new(&doc);
        let content = b"BT /F1 12 Tf 72 700 Td (Name) Tj 180 0 Td (Cases) Tj ET \
                        BT /F1 12 Tf 14 TL 72 700 Td T* (Kano) Tj ET";
        let spans = extractor
            .parse_content_stream(content, &BTreeMap::new())
            .unwrap();

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "Name");
        assert_eq!((spans[0].x, spans[0].y), (72.0, 700.0));
        assert_eq!((spans[1].x, spans[1].y), (252.0, 700.0));
        assert_eq!(spans[2].text, "Kano");
        assert_eq!((spans[2].x, spans[2].y), (72.0, 686.0));
    }

    #[test]
    fn test_text_outside_block_ignored() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = SpanExtractor::new(&doc);
        let spans = extractor
            .parse_content_stream(b"(stray) Tj BT ( ) Tj ET", &BTreeMap::new())
            .unwrap();
        assert!(spans.is_empty());
    }
}
