use crate::layout::Measure;
use crate::refs::ObjectReferences;
use crate::{PDFError, Pt};
use pdf_writer::Pdf;
use std::fmt::Write;

mod standard;
mod truetype;

pub use standard::StandardFont;
pub use truetype::TrueTypeFont;

/// A font that can be placed in a document. Fonts are stored "globally" in a
/// [Document](crate::Document) and referred to from page contents by their id.
///
/// * [Font::TrueType] fonts are embedded in their entirety, so large fonts may
///   dramatically increase the size of the generated PDF.
/// * [Font::Standard] fonts are referenced by name only and rendered by the
///   reader; they only cover the WinAnsi character set.
#[derive(Debug)]
pub enum Font {
    TrueType(TrueTypeFont),
    Standard(StandardFont),
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        TrueTypeFont::load(bytes).map(Font::TrueType)
    }

    /// Reference one of the standard fonts
    pub fn standard(font: StandardFont) -> Font {
        Font::Standard(font)
    }

    /// A human readable name, for logging
    pub fn display_name(&self) -> String {
        match self {
            Font::TrueType(ttf) => ttf.name().unwrap_or_else(|| "unnamed TrueType font".into()),
            Font::Standard(base) => base.base_font().to_string(),
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::TrueType(ttf) => ttf.ascent(size),
            Font::Standard(_) => size * (StandardFont::ASCENDER / StandardFont::UNITS_PER_EM),
        }
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            Font::TrueType(ttf) => ttf.descent(size),
            Font::Standard(_) => size * (StandardFont::DESCENDER / StandardFont::UNITS_PER_EM),
        }
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let gap = match self {
            Font::TrueType(ttf) => ttf.line_gap(size),
            Font::Standard(_) => size * (StandardFont::LINE_GAP / StandardFont::UNITS_PER_EM),
        };
        gap + self.ascent(size) - self.descent(size)
    }

    /// Width of `text` at `size`. Returns [None] when the font cannot measure one of
    /// the characters.
    pub fn width_of(&self, text: &str, size: Pt) -> Option<Pt> {
        match self {
            Font::TrueType(ttf) => ttf.width_of(text, size),
            Font::Standard(base) => base.width_of(text, size),
        }
    }

    /// Append `text` to a content stream as a hex string operand (`<...>`) in the
    /// font's encoding
    pub(crate) fn encode_hex(&self, text: &str, out: &mut String) {
        out.push('<');
        for ch in text.chars() {
            // writing to a String cannot fail
            let _ = match self {
                Font::TrueType(ttf) => write!(out, "{:04x}", ttf.render_glyph_id(ch)),
                Font::Standard(_) => write!(out, "{:02x}", StandardFont::encode(ch)),
            };
        }
        out.push('>');
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Font::TrueType(ttf) => ttf.write(refs, font_index, writer),
            Font::Standard(base) => base.write(refs, font_index, writer),
        }
    }
}

impl Measure for Font {
    fn measure(&self, text: &str, size: Pt) -> Option<Pt> {
        self.width_of(text, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_font_metrics() {
        let font = Font::standard(StandardFont::Helvetica);
        assert!((*font.ascent(Pt(10.0)) - 7.18).abs() < 1e-4);
        assert!(font.descent(Pt(10.0)) < Pt(0.0));
        let line_height = font.line_height(Pt(10.0));
        assert!((*line_height - 11.5).abs() < 1e-4);
    }

    #[test]
    fn standard_font_hex_encoding() {
        let font = Font::standard(StandardFont::HelveticaBold);
        let mut out = String::new();
        font.encode_hex("Hi!", &mut out);
        assert_eq!(out, "<486921>");
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        assert!(matches!(
            Font::load(b"definitely not a font".to_vec()),
            Err(PDFError::FaceParsingError(_))
        ));
    }
}
