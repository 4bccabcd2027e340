use super::flow::FALLBACK_CHAR_WIDTH_EM;
use crate::font::Font;
use crate::units::Pt;

/// Rough width of `text` assuming every character is half an em wide
pub fn estimate_width(text: &str, size: Pt) -> Pt {
    size * FALLBACK_CHAR_WIDTH_EM * text.chars().count() as f32
}

/// Width of `text` in `font`, estimated when the font cannot measure it
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    font.width_of(text, size).unwrap_or_else(|| {
        log::debug!(
            "{} cannot measure {text:?}, estimating its width",
            font.display_name()
        );
        estimate_width(text, size)
    })
}

/// Horizontal alignment of a single line relative to an anchor x coordinate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    /// The line starts at the anchor
    Left,
    /// The line is centred on the anchor
    Centre,
    /// The line ends at the anchor
    Right,
}

impl Align {
    /// Where a line of the given width has to start to honour the alignment
    pub fn start_x(self, anchor: Pt, width: Pt) -> Pt {
        match self {
            Align::Left => anchor,
            Align::Centre => anchor - width / 2.0,
            Align::Right => anchor - width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;

    #[test]
    fn alignment_offsets() {
        assert_eq!(Align::Left.start_x(Pt(100.0), Pt(40.0)), Pt(100.0));
        assert_eq!(Align::Centre.start_x(Pt(100.0), Pt(40.0)), Pt(80.0));
        assert_eq!(Align::Right.start_x(Pt(100.0), Pt(40.0)), Pt(60.0));
    }

    #[test]
    fn unmeasurable_text_is_estimated() {
        let font = Font::standard(StandardFont::Helvetica);
        assert_eq!(width_of_text("日本語", &font, Pt(10.0)), Pt(15.0));
        assert_eq!(
            Some(width_of_text("Accra", &font, Pt(10.0))),
            font.width_of("Accra", Pt(10.0))
        );
    }
}
