//! The standard (non-embedded) Helvetica faces every PDF reader ships with.
//!
//! Widths are taken from the Adobe Core14 AFM files, in 1/1000 em.

use crate::refs::{ObjectReferences, RefType};
use crate::Pt;
use pdf_writer::{Name, Pdf};

/// One of the base-14 fonts this crate can reference without embedding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

// AFM advance widths for U+0020 ..= U+007E
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFont {
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub(crate) const UNITS_PER_EM: f32 = 1000.0;
    pub(crate) const ASCENDER: f32 = 718.0;
    pub(crate) const DESCENDER: f32 = -207.0;
    // neither AFM specifies a line gap; this gives the customary 1.15em line height
    pub(crate) const LINE_GAP: f32 = 225.0;

    /// Advance width in 1/1000 em, for the characters the AFM covers
    fn advance(&self, ch: char) -> Option<u16> {
        let code = ch as u32;
        if (0x20..=0x7e).contains(&code) {
            let table = match self {
                StandardFont::Helvetica => &HELVETICA_WIDTHS,
                StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            };
            return Some(table[(code - 0x20) as usize]);
        }

        let bold = matches!(self, StandardFont::HelveticaBold);
        let width = match ch {
            '\u{2013}' | '€' => 556,
            '\u{2014}' | '…' => 1000,
            '•' => 350,
            '\u{2018}' | '\u{2019}' if bold => 278,
            '\u{2018}' | '\u{2019}' => 222,
            '\u{201C}' | '\u{201D}' if bold => 500,
            '\u{201C}' | '\u{201D}' => 333,
            _ => return None,
        };
        Some(width)
    }

    /// Width of `text` at `size`, or [None] if a character has no known width
    pub fn width_of(&self, text: &str, size: Pt) -> Option<Pt> {
        let scaling = size / Self::UNITS_PER_EM;
        text.chars()
            .map(|ch| self.advance(ch).map(|w| scaling * w as f32))
            .sum()
    }

    /// Map a character to its WinAnsiEncoding byte. Anything outside the encoding
    /// is drawn as `?`.
    pub(crate) fn encode(ch: char) -> u8 {
        match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '•' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(font_index));
        let mut font = writer.type1_font(id);
        font.base_font(Name(self.base_font().as_bytes()));
        font.encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}
