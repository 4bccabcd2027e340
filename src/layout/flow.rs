use crate::rect::Rect;
use crate::units::Pt;
use thiserror::Error;

/// Average glyph advance, in em, assumed when a line cannot be measured
pub const FALLBACK_CHAR_WIDTH_EM: f32 = 0.5;

/// Something that can tell how wide a run of text is at a given size. The font is
/// whatever the implementor measures with, so a [Font](crate::Font) measures
/// itself and closures can stand in for fonts in tests.
///
/// Returning [None] means the width could not be evaluated (e.g. the font has no
/// glyph for one of the characters). The flow engine then falls back to counting
/// characters.
pub trait Measure {
    fn measure(&self, text: &str, size: Pt) -> Option<Pt>;
}

impl<F> Measure for F
where
    F: Fn(&str, Pt) -> Option<Pt>,
{
    fn measure(&self, text: &str, size: Pt) -> Option<Pt> {
        self(text, size)
    }
}

/// Geometry rejected by the flow engine before any layout happens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("column width must be positive, got {0}")]
    NonPositiveColumnWidth(Pt),

    #[error("leading must be positive, got {0}")]
    NonPositiveLeading(Pt),

    #[error("font size must be positive, got {0}")]
    NonPositiveFontSize(Pt),

    #[error("{0} is not a finite length")]
    NonFinite(&'static str),
}

/// Where body text may go. All values are in page coordinates (origin bottom-left),
/// `y` values are baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowGeometry {
    /// Left edge of the column
    pub x: Pt,
    /// Maximum width of a line
    pub column_width: Pt,
    /// Distance between consecutive baselines
    pub leading: Pt,
    /// Baseline of the first line on the first page
    pub start_y: Pt,
    /// Baseline of the first line on every following page
    pub top_margin: Pt,
    /// No baseline may be placed such that the next one would fall below this
    pub bottom_reserved: Pt,
}

impl FlowGeometry {
    /// A column filling `content_box`, starting at its top edge on every page
    pub fn within(content_box: Rect, leading: Pt) -> FlowGeometry {
        FlowGeometry {
            x: content_box.x1,
            column_width: content_box.width(),
            leading,
            start_y: content_box.y2,
            top_margin: content_box.y2,
            bottom_reserved: content_box.y1,
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let named = [
            ("x", self.x),
            ("column width", self.column_width),
            ("leading", self.leading),
            ("start y", self.start_y),
            ("top margin", self.top_margin),
            ("bottom reserved", self.bottom_reserved),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::NonFinite(*name));
        }
        if self.column_width <= Pt(0.0) {
            return Err(LayoutError::NonPositiveColumnWidth(self.column_width));
        }
        if self.leading <= Pt(0.0) {
            return Err(LayoutError::NonPositiveLeading(self.leading));
        }
        Ok(())
    }
}

/// A single step for a renderer to execute
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Draw one line of text with its baseline starting at (x, y)
    PlaceLine { text: String, x: Pt, y: Pt },
    /// Finish the current page (footer and other chrome) and start a new one
    PageBreak,
}

/// Incremental text flow. Keeps the page cursor between calls so callers can mix
/// wrapped paragraphs, blank lines and short fixed lines (e.g. a signature block)
/// and still paginate them as one stream.
///
/// Nothing is drawn; [Flow::finish] hands back the instructions.
pub struct Flow<'m, M: Measure + ?Sized> {
    geometry: FlowGeometry,
    size: Pt,
    measure: &'m M,
    cursor: Pt,
    instructions: Vec<Instruction>,
}

impl<'m, M: Measure + ?Sized> Flow<'m, M> {
    pub fn new(geometry: FlowGeometry, size: Pt, measure: &'m M) -> Result<Self, LayoutError> {
        geometry.validate()?;
        if !size.is_finite() {
            return Err(LayoutError::NonFinite("font size"));
        }
        if size <= Pt(0.0) {
            return Err(LayoutError::NonPositiveFontSize(size));
        }

        Ok(Flow {
            geometry,
            size,
            measure,
            cursor: geometry.start_y,
            instructions: Vec::new(),
        })
    }

    /// Baseline the next line would be placed on, before any page break it triggers
    pub fn cursor(&self) -> Pt {
        self.cursor
    }

    /// Advance by one line without drawing anything
    pub fn blank_line(&mut self) {
        self.advance();
    }

    /// Place `text` on a line of its own without wrapping it. Empty text is a
    /// blank line.
    pub fn line(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.blank_line();
        } else {
            self.place(text.to_string());
        }
    }

    /// Greedily wrap `text` into lines that fit the column. Runs of whitespace
    /// collapse to single spaces; an empty paragraph is a blank line.
    pub fn paragraph(&mut self, text: &str) {
        let mut words = text.split_whitespace();
        let Some(first) = words.next() else {
            self.blank_line();
            return;
        };

        let mut line = first.to_string();
        for word in words {
            let candidate = format!("{line} {word}");
            if self.fits(&candidate) {
                line = candidate;
            } else {
                let finished = std::mem::replace(&mut line, word.to_string());
                self.place(finished);
            }
        }
        self.place(line);
    }

    /// Wrap each paragraph in turn, separated by single blank lines
    pub fn paragraphs<S: AsRef<str>>(&mut self, paragraphs: &[S]) {
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                self.blank_line();
            }
            self.paragraph(paragraph.as_ref());
        }
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.instructions
    }

    fn fits(&self, candidate: &str) -> bool {
        match self.measure.measure(candidate, self.size) {
            Some(width) => width <= self.geometry.column_width,
            None => {
                let max_chars =
                    (self.geometry.column_width / (self.size * FALLBACK_CHAR_WIDTH_EM)).floor();
                log::trace!("cannot measure {candidate:?}, allowing {max_chars} characters");
                candidate.chars().count() as f32 <= max_chars
            }
        }
    }

    fn place(&mut self, text: String) {
        let y = self.advance();
        self.instructions.push(Instruction::PlaceLine {
            text,
            x: self.geometry.x,
            y,
        });
    }

    /// Claim the current baseline, breaking the page first if the line after it
    /// would cross into the reserved bottom band
    fn advance(&mut self) -> Pt {
        if self.cursor - self.geometry.leading < self.geometry.bottom_reserved {
            self.instructions.push(Instruction::PageBreak);
            self.cursor = self.geometry.top_margin;
        }
        let y = self.cursor;
        self.cursor -= self.geometry.leading;
        y
    }
}

/// Lay out `paragraphs` into a column, one blank line between consecutive
/// paragraphs, paginating whenever the reserved bottom band would be entered.
///
/// Words are never split: a word wider than the column sits on a line of its own
/// and overflows. When `measure` cannot evaluate a line, the line is allowed
/// `column_width / (size * 0.5)` characters instead.
///
/// ```
/// use brand_docs::layout::{layout, FlowGeometry, Instruction};
/// use brand_docs::Pt;
///
/// let monospace = |text: &str, size: Pt| Some(size * 0.5 * text.chars().count() as f32);
/// let geometry = FlowGeometry {
///     x: Pt(72.0),
///     column_width: Pt(60.0),
///     leading: Pt(12.0),
///     start_y: Pt(700.0),
///     top_margin: Pt(700.0),
///     bottom_reserved: Pt(72.0),
/// };
///
/// let instructions = layout(&["lorem ipsum dolor"], &geometry, Pt(10.0), &monospace)
///     .expect("geometry is valid");
/// assert_eq!(instructions.len(), 2);
/// assert_eq!(
///     instructions[1],
///     Instruction::PlaceLine { text: "dolor".into(), x: Pt(72.0), y: Pt(688.0) }
/// );
/// ```
pub fn layout<S: AsRef<str>, M: Measure + ?Sized>(
    paragraphs: &[S],
    geometry: &FlowGeometry,
    size: Pt,
    measure: &M,
) -> Result<Vec<Instruction>, LayoutError> {
    let mut flow = Flow::new(*geometry, size, measure)?;
    flow.paragraphs(paragraphs);
    Ok(flow.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Pt = Pt(10.0);

    /// every character is 5pt wide at 10pt
    fn monospace(text: &str, size: Pt) -> Option<Pt> {
        Some(size * FALLBACK_CHAR_WIDTH_EM * text.chars().count() as f32)
    }

    fn unmeasurable(_: &str, _: Pt) -> Option<Pt> {
        None
    }

    fn geometry(column_width: f32) -> FlowGeometry {
        FlowGeometry {
            x: Pt(40.0),
            column_width: Pt(column_width),
            leading: Pt(10.0),
            start_y: Pt(700.0),
            top_margin: Pt(780.0),
            bottom_reserved: Pt(60.0),
        }
    }

    #[test]
    fn geometry_within_a_content_box() {
        let content_box = Rect::from_origin(Pt(40.0), Pt(80.0), Pt(515.0), Pt(642.0));
        let geometry = FlowGeometry::within(content_box, Pt(14.0));
        assert_eq!(geometry.x, Pt(40.0));
        assert_eq!(geometry.column_width, Pt(515.0));
        assert_eq!(geometry.start_y, Pt(722.0));
        assert_eq!(geometry.top_margin, geometry.start_y);
        assert_eq!(geometry.bottom_reserved, Pt(80.0));
        assert_eq!(geometry.validate(), Ok(()));
    }

    fn lines(instructions: &[Instruction]) -> Vec<&str> {
        instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::PlaceLine { text, .. } => Some(text.as_str()),
                Instruction::PageBreak => None,
            })
            .collect()
    }

    fn page_breaks(instructions: &[Instruction]) -> usize {
        instructions
            .iter()
            .filter(|i| matches!(i, Instruction::PageBreak))
            .count()
    }

    #[test]
    fn breaks_before_the_first_word_that_overflows() {
        let paragraphs = [
            "Hello world",
            "",
            "This is a test of wrapping behavior across a narrow column width",
        ];
        // 100pt holds 20 characters
        let out = layout(&paragraphs, &geometry(100.0), SIZE, &monospace).expect("valid");

        assert_eq!(
            lines(&out),
            vec![
                "Hello world",
                "This is a test of",
                "wrapping behavior",
                "across a narrow",
                "column width",
            ]
        );
        for line in lines(&out) {
            let width = monospace(line, SIZE).expect("measurable");
            assert!(width <= Pt(100.0), "{line:?} is {width} wide");
        }
    }

    #[test]
    fn blank_paragraphs_and_separators_advance_the_cursor() {
        let paragraphs = ["Hello world", "", "second"];
        let out = layout(&paragraphs, &geometry(100.0), SIZE, &monospace).expect("valid");

        // separator, blank paragraph, separator: three empty baselines
        assert_eq!(
            out,
            vec![
                Instruction::PlaceLine {
                    text: "Hello world".into(),
                    x: Pt(40.0),
                    y: Pt(700.0)
                },
                Instruction::PlaceLine {
                    text: "second".into(),
                    x: Pt(40.0),
                    y: Pt(660.0)
                },
            ]
        );
    }

    #[test]
    fn each_blank_paragraph_is_exactly_one_line() {
        let measure = &monospace;
        let mut flow = Flow::new(geometry(100.0), SIZE, measure).expect("valid");
        flow.paragraph("");
        assert_eq!(flow.cursor(), Pt(690.0));
        flow.paragraph("   \t ");
        assert_eq!(flow.cursor(), Pt(680.0));
        assert!(flow.finish().is_empty());
    }

    #[test]
    fn preserves_every_word_in_order() {
        let text = "Our analysis indicates that a collaboration could unlock significant \
                    value in the market. We have attached a detailed proposal for your \
                    review and would be pleased to discuss this further at your convenience.";
        let expected: Vec<&str> = text.split_whitespace().collect();

        for width in [30.0, 55.0, 100.0, 180.0, 400.0, 5000.0] {
            let out = layout(&[text], &geometry(width), SIZE, &monospace).expect("valid");
            let words: Vec<&str> = lines(&out)
                .into_iter()
                .flat_map(|line| line.split(' '))
                .collect();
            assert_eq!(words, expected, "column width {width}");
        }
    }

    #[test]
    fn no_page_break_when_the_bottom_is_never_reached() {
        let out = layout(
            &["one two three", "four five six"],
            &geometry(100.0),
            SIZE,
            &monospace,
        )
        .expect("valid");
        assert_eq!(page_breaks(&out), 0);
    }

    #[test]
    fn paginates_and_resets_to_the_top_margin() {
        let geometry = FlowGeometry {
            x: Pt(40.0),
            column_width: Pt(30.0),
            leading: Pt(10.0),
            start_y: Pt(100.0),
            top_margin: Pt(200.0),
            bottom_reserved: Pt(50.0),
        };
        // one word per line
        let text = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj kkkk llll mmmm nnnn oooo \
                    pppp qqqq rrrr ssss tttt uuuu vvvv wwww xxxx";
        let out = layout(&[text], &geometry, SIZE, &monospace).expect("valid");

        // 100, 90, 80, 70, 60 fit on the first page
        assert_eq!(
            out[4],
            Instruction::PlaceLine {
                text: "eeee".into(),
                x: Pt(40.0),
                y: Pt(60.0)
            }
        );
        assert_eq!(out[5], Instruction::PageBreak);
        assert!(page_breaks(&out) >= 1);

        for (i, instruction) in out.iter().enumerate() {
            if *instruction == Instruction::PageBreak {
                match &out[i + 1] {
                    Instruction::PlaceLine { y, .. } => assert_eq!(*y, Pt(200.0)),
                    other => panic!("expected a line after a page break, got {other:?}"),
                }
            }
            if let Instruction::PlaceLine { y, .. } = instruction {
                assert!(*y - geometry.leading >= geometry.bottom_reserved);
            }
        }
    }

    #[test]
    fn blank_lines_can_trigger_a_page_break() {
        let geometry = FlowGeometry {
            x: Pt(0.0),
            column_width: Pt(100.0),
            leading: Pt(10.0),
            start_y: Pt(70.0),
            top_margin: Pt(200.0),
            bottom_reserved: Pt(50.0),
        };
        let out = layout(&["first", "", "last"], &geometry, SIZE, &monospace).expect("valid");
        // first at 70, separator at 60, blank paragraph breaks the page and takes 200,
        // separator 190, last 180
        assert_eq!(
            out,
            vec![
                Instruction::PlaceLine {
                    text: "first".into(),
                    x: Pt(0.0),
                    y: Pt(70.0)
                },
                Instruction::PageBreak,
                Instruction::PlaceLine {
                    text: "last".into(),
                    x: Pt(0.0),
                    y: Pt(180.0)
                },
            ]
        );
    }

    #[test]
    fn oversized_word_sits_alone_without_a_page_break() {
        let word = "Supercalifragilisticexpialidocious";
        assert!(monospace(word, SIZE).expect("measurable") > Pt(100.0));

        let out = layout(&[format!("a {word} b")], &geometry(100.0), SIZE, &monospace)
            .expect("valid");
        assert_eq!(lines(&out), vec!["a", word, "b"]);
        assert_eq!(page_breaks(&out), 0);

        let alone = layout(&[word], &geometry(100.0), SIZE, &monospace).expect("valid");
        assert_eq!(lines(&alone), vec![word]);
    }

    #[test]
    fn unmeasurable_text_falls_back_to_character_counts() {
        let text = "This is a test of wrapping behavior across a narrow column width";
        // 100 / (10 * 0.5) = 20 characters, the same budget the monospace measure gives
        let fallback = layout(&[text], &geometry(100.0), SIZE, &unmeasurable).expect("valid");
        let measured = layout(&[text], &geometry(100.0), SIZE, &monospace).expect("valid");
        assert_eq!(fallback, measured);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let none: [&str; 0] = [];
        assert!(layout(&none, &geometry(100.0), SIZE, &monospace)
            .expect("valid")
            .is_empty());
    }

    #[test]
    fn rejects_invalid_geometry() {
        let check = |geometry: FlowGeometry, size: Pt| {
            layout(&["text"], &geometry, size, &monospace).expect_err("invalid")
        };

        assert_eq!(
            check(geometry(0.0), SIZE),
            LayoutError::NonPositiveColumnWidth(Pt(0.0))
        );
        assert_eq!(
            check(
                FlowGeometry {
                    leading: Pt(-1.0),
                    ..geometry(100.0)
                },
                SIZE
            ),
            LayoutError::NonPositiveLeading(Pt(-1.0))
        );
        assert_eq!(
            check(geometry(100.0), Pt(0.0)),
            LayoutError::NonPositiveFontSize(Pt(0.0))
        );
        assert_eq!(
            check(geometry(f32::NAN), SIZE),
            LayoutError::NonFinite("column width")
        );
    }

    #[test]
    fn cramped_top_margin_only_matters_after_a_break() {
        // a fresh page has no room above the reserved band
        let cramped = FlowGeometry {
            top_margin: Pt(0.0),
            ..geometry(200.0)
        };
        let instructions =
            layout(&["Hello world"], &cramped, SIZE, &monospace).expect("short text fits");
        assert_eq!(
            instructions,
            vec![Instruction::PlaceLine {
                text: "Hello world".into(),
                x: Pt(40.0),
                y: Pt(700.0),
            }]
        );

        // the separator and "two" each break onto a page of their own
        let tall = FlowGeometry {
            start_y: Pt(70.0),
            ..cramped
        };
        let instructions =
            layout(&["one", "two"], &tall, SIZE, &monospace).expect("still lays out");
        let breaks = instructions
            .iter()
            .filter(|i| **i == Instruction::PageBreak)
            .count();
        assert_eq!(breaks, 2);
        assert_eq!(lines(&instructions), vec!["one", "two"]);
    }

    #[test]
    fn fixed_lines_are_not_wrapped() {
        let measure = &monospace;
        let mut flow = Flow::new(geometry(30.0), SIZE, measure).expect("valid");
        flow.line("Director of Business Development");
        flow.line("");
        flow.line("Acme");
        assert_eq!(
            lines(&flow.finish()),
            vec!["Director of Business Development", "Acme"]
        );
    }
}
