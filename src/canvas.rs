//! A page-at-a-time drawing surface over a [Document].
//!
//! The canvas owns the document being built and the page currently being
//! drawn on. [Canvas::show_page] files the current page and starts a fresh one,
//! the way a pen plotter or a print canvas works. Coordinates are PDF page
//! coordinates: points, origin at the bottom-left corner.

use crate::brand::{Brand, FontSet, Weight};
use crate::colour::Colour;
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{self, Align, Flow, FlowGeometry, Instruction, Margins};
use crate::opacity::Opacity;
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Id;
use pdf_writer::Content;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// How a run of text looks
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub weight: Weight,
    pub size: Pt,
    pub colour: Colour,
}

impl TextStyle {
    pub fn regular(size: Pt, colour: Colour) -> TextStyle {
        TextStyle {
            weight: Weight::Regular,
            size,
            colour,
        }
    }

    pub fn bold(size: Pt, colour: Colour) -> TextStyle {
        TextStyle {
            weight: Weight::Bold,
            size,
            colour,
        }
    }
}

/// Decorations drawn around flowed text whenever it crosses onto a new page
pub trait PageChrome {
    /// Called on a fresh page before any flowed text lands on it
    fn begin_page(&self, _canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        Ok(())
    }

    /// Called on a page the flowed text is about to leave
    fn finish_page(&self, _canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        Ok(())
    }
}

/// No chrome at all
impl PageChrome for () {}

pub struct Canvas<'b> {
    brand: &'b Brand,
    document: Document,
    fonts: FontSet,
    page_size: PageSize,
    margins: Option<Margins>,
    current: Page,
    images: HashMap<PathBuf, Id<Image>>,
    opacities: Vec<(Opacity, Id<Opacity>)>,
}

impl<'b> Canvas<'b> {
    /// Start a document drawn with `brand`, registering its fonts and opening the
    /// first page
    pub fn new(brand: &'b Brand, page_size: PageSize) -> Result<Canvas<'b>, PDFError> {
        let mut document = Document::default();
        let fonts = FontSet::register(&brand.font_providers, &mut document)?;
        log::debug!(
            "drawing with {} / {}",
            document.fonts[fonts.regular].display_name(),
            document.fonts[fonts.bold].display_name()
        );

        Ok(Canvas {
            brand,
            document,
            fonts,
            page_size,
            margins: None,
            current: Page::new(page_size, None),
            images: HashMap::new(),
            opacities: Vec::new(),
        })
    }

    pub fn brand(&self) -> &'b Brand {
        self.brand
    }

    pub fn fonts(&self) -> FontSet {
        self.fonts
    }

    pub fn font(&self, weight: Weight) -> &Font {
        &self.document.fonts[self.fonts.get(weight)]
    }

    pub fn width(&self) -> Pt {
        self.page_size.0
    }

    pub fn height(&self) -> Pt {
        self.page_size.1
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Pages finished with [Canvas::show_page] so far
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// The page being drawn on
    pub fn current_page(&self) -> &Page {
        &self.current
    }

    /// Set the text area of the current page and of every page after it
    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = Some(margins);
        self.current.set_margins(margins);
    }

    /// The text area of the current page
    pub fn content_box(&self) -> Rect {
        self.current.content_box
    }

    /// Width of `text` in the given style. Text the font cannot measure is
    /// estimated at half an em per character.
    pub fn text_width(&self, text: &str, style: &TextStyle) -> Pt {
        layout::width_of_text(text, self.font(style.weight), style.size)
    }

    /// Draw `text` with its baseline starting at (x, y)
    pub fn draw_text(&mut self, x: Pt, y: Pt, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        self.current.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.fonts.get(style.weight),
                size: style.size,
            },
            colour: style.colour,
            coords: (x, y),
        });
    }

    /// Draw `text` so that it ends at `x`
    pub fn draw_text_right(&mut self, x: Pt, y: Pt, text: &str, style: &TextStyle) {
        self.draw_aligned(Align::Right, x, y, text, style);
    }

    /// Draw `text` centred on `x`
    pub fn draw_text_centred(&mut self, x: Pt, y: Pt, text: &str, style: &TextStyle) {
        self.draw_aligned(Align::Centre, x, y, text, style);
    }

    fn draw_aligned(&mut self, align: Align, x: Pt, y: Pt, text: &str, style: &TextStyle) {
        let width = self.text_width(text, style);
        self.draw_text(align.start_x(x, width), y, text, style);
    }

    pub fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        let mut content = Content::new();
        set_fill(&mut content, colour);
        content.rect(
            rect.x1.into(),
            rect.y1.into(),
            rect.width().into(),
            rect.height().into(),
        );
        content.fill_nonzero();
        self.current.add_content(content);
    }

    /// Fill the closed polygon through `points`. Fewer than three points draw
    /// nothing.
    pub fn fill_polygon(&mut self, points: &[(Pt, Pt)], colour: Colour) {
        let [(x0, y0), rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            return;
        }

        let mut content = Content::new();
        set_fill(&mut content, colour);
        content.move_to((*x0).into(), (*y0).into());
        for (x, y) in rest {
            content.line_to((*x).into(), (*y).into());
        }
        content.close_path();
        content.fill_nonzero();
        self.current.add_content(content);
    }

    pub fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), width: Pt, colour: Colour) {
        let mut content = Content::new();
        set_stroke(&mut content, colour);
        content.set_line_width(width.into());
        content.move_to(from.0.into(), from.1.into());
        content.line_to(to.0.into(), to.1.into());
        content.stroke();
        self.current.add_content(content);
    }

    /// Draw the first of `candidates` that exists, stretched into `rect`.
    /// `opacity` is clamped into `0.0..=1.0`. Returns whether anything was drawn;
    /// a candidate that exists but cannot be decoded is an error.
    pub fn draw_image<P: AsRef<Path>>(
        &mut self,
        candidates: &[P],
        rect: Rect,
        opacity: Option<f32>,
    ) -> Result<bool, PDFError> {
        let mut found = None;
        for candidate in candidates {
            if let Some(image_id) = self.load_image(candidate.as_ref())? {
                found = Some(image_id);
                break;
            }
        }
        let Some(image_id) = found else {
            return Ok(false);
        };

        let opacity = opacity.map(|alpha| self.opacity(Opacity::new(alpha)));
        self.current.add_image(ImageLayout {
            image_id,
            position: rect,
            opacity,
        });
        Ok(true)
    }

    /// `None` when there is no file at `path`
    fn load_image(&mut self, path: &Path) -> Result<Option<Id<Image>>, PDFError> {
        if let Some(image_id) = self.images.get(path) {
            return Ok(Some(*image_id));
        }
        if !path.is_file() {
            log::debug!("no image at {}", path.display());
            return Ok(None);
        }

        let image = Image::from_path(path).map_err(|e| {
            log::warn!("cannot use image {}: {e}", path.display());
            e
        })?;
        let image_id = self.document.add_image(image);
        self.images.insert(path.to_path_buf(), image_id);
        Ok(Some(image_id))
    }

    fn opacity(&mut self, opacity: Opacity) -> Id<Opacity> {
        if let Some((_, id)) = self.opacities.iter().find(|(o, _)| *o == opacity) {
            return *id;
        }
        let id = self.document.add_opacity(opacity);
        self.opacities.push((opacity, id));
        id
    }

    /// File the current page and start a blank one
    pub fn show_page(&mut self) {
        let page = std::mem::replace(&mut self.current, Page::new(self.page_size, self.margins));
        self.document.add_page(page);
    }

    /// Lay `paragraphs` out into the column described by `geometry` and draw them.
    /// On every page break `chrome` finishes the page being left and decorates
    /// the new one. Returns the baseline the next line would go on.
    pub fn flow<S: AsRef<str>>(
        &mut self,
        paragraphs: &[S],
        style: &TextStyle,
        geometry: &FlowGeometry,
        chrome: &dyn PageChrome,
    ) -> Result<Pt, PDFError> {
        let mut flow = Flow::new(*geometry, style.size, self.font(style.weight))?;
        flow.paragraphs(paragraphs);
        let cursor = flow.cursor();
        let instructions = flow.finish();

        self.run(instructions, style, chrome)?;
        Ok(cursor)
    }

    /// Execute instructions produced by the flow engine
    pub fn run(
        &mut self,
        instructions: Vec<Instruction>,
        style: &TextStyle,
        chrome: &dyn PageChrome,
    ) -> Result<(), PDFError> {
        for instruction in instructions {
            match instruction {
                Instruction::PlaceLine { text, x, y } => self.draw_text(x, y, &text, style),
                Instruction::PageBreak => {
                    chrome.finish_page(self)?;
                    self.show_page();
                    chrome.begin_page(self)?;
                }
            }
        }
        Ok(())
    }

    /// Finish drawing. A trailing page with nothing on it is dropped, unless it
    /// is the only page.
    pub fn into_document(self) -> Document {
        let Canvas {
            mut document,
            current,
            ..
        } = self;
        if !current.contents.is_empty() || document.page_count() == 0 {
            document.add_page(current);
        }
        document
    }

    /// Write the document to `path`, creating missing parent directories
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), PDFError> {
        save_document(self.into_document(), path.as_ref())
    }
}

pub(crate) fn save_document(document: Document, path: &Path) -> Result<(), PDFError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let out = BufWriter::new(File::create(path)?);
    document.write(out)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::page::PageContents;
    use crate::pagesize;

    fn brand() -> Brand {
        Brand::from_assets(crate::brand::AssetPaths::new("/no/such/brand/assets"))
    }

    fn style() -> TextStyle {
        TextStyle::regular(Pt(10.0), colours::BLACK)
    }

    #[test]
    fn margins_carry_over_to_new_pages() {
        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        canvas.set_margins(Margins::all(Pt(50.0)));
        canvas.show_page();
        assert_eq!(canvas.content_box().x1, Pt(50.0));
        assert_eq!(canvas.content_box().y2, canvas.height() - Pt(50.0));
    }

    #[test]
    fn aligned_text_is_measured() {
        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        let width = canvas.text_width("Invoice", &style());
        assert!(width > Pt(0.0));

        canvas.draw_text_right(Pt(500.0), Pt(700.0), "Invoice", &style());
        canvas.draw_text_centred(Pt(300.0), Pt(650.0), "Invoice", &style());

        let xs: Vec<Pt> = canvas.current_page().spans().map(|s| s.coords.0).collect();
        assert_eq!(xs, vec![Pt(500.0) - width, Pt(300.0) - width / 2.0]);
    }

    #[test]
    fn missing_images_draw_nothing() {
        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        let drawn = canvas.draw_image(
            &["/no/such/logo.png", "/no/such/logos/logo.png"],
            Rect::from_origin(Pt(40.0), Pt(700.0), Pt(80.0), Pt(32.0)),
            None,
        );
        assert!(!drawn.expect("missing files are skipped"));
        assert!(canvas.current_page().contents.is_empty());
    }

    #[test]
    fn images_are_loaded_once_and_opacities_shared() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("mark.png");
        image::DynamicImage::new_rgba8(2, 2)
            .save(&path)
            .expect("can write png");

        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        let rect = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0));
        assert!(canvas.draw_image(&[&path], rect, Some(0.2)).expect("png decodes"));
        assert!(canvas.draw_image(&[&path], rect, Some(0.2)).expect("cached"));
        assert!(canvas.draw_image(&[&path], rect, Some(7.0)).expect("cached"));

        let doc = canvas.into_document();
        assert_eq!(doc.images.len(), 1);
        assert_eq!(doc.opacities.len(), 2);
        let alphas: Vec<f32> = doc.opacities.iter().map(|(_, o)| o.alpha()).collect();
        assert_eq!(alphas, vec![0.2, 1.0]);
    }

    #[test]
    fn undecodable_images_are_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let broken = dir.path().join("logo.png");
        std::fs::write(&broken, b"not a png").expect("can write file");

        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        let rect = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0));
        let missing = dir.path().join("missing.png");
        assert!(matches!(
            canvas.draw_image(&[&missing, &broken], rect, None),
            Err(PDFError::Image(_))
        ));
        assert!(canvas.current_page().contents.is_empty());
    }

    struct CountingChrome(std::cell::Cell<usize>);

    impl PageChrome for CountingChrome {
        fn finish_page(&self, canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
            self.0.set(self.0.get() + 1);
            canvas.draw_text(Pt(40.0), Pt(30.0), "footer", &style());
            Ok(())
        }
    }

    #[test]
    fn flowing_text_paginates_with_chrome() {
        let brand = brand();
        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        let geometry = FlowGeometry {
            x: Pt(72.0),
            column_width: Pt(200.0),
            leading: Pt(15.0),
            start_y: Pt(300.0),
            top_margin: Pt(760.0),
            bottom_reserved: Pt(80.0),
        };
        let paragraphs = vec![lipsum::lipsum_words(400)];
        let chrome = CountingChrome(std::cell::Cell::new(0));

        let next = canvas
            .flow(&paragraphs, &style(), &geometry, &chrome)
            .expect("valid geometry");

        assert!(chrome.0.get() >= 1);
        assert_eq!(canvas.page_count(), chrome.0.get());
        assert!(next < Pt(760.0));
        for span in canvas.current_page().spans() {
            assert!(span.coords.1 >= Pt(80.0));
        }
    }

    #[test]
    fn an_untouched_canvas_still_has_a_page() {
        let brand = brand();
        let canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        assert_eq!(canvas.into_document().page_count(), 1);

        let mut canvas = Canvas::new(&brand, pagesize::A4).expect("helvetica fallback");
        canvas.fill_rect(
            Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
            colours::MID_GREY,
        );
        canvas.show_page();
        let doc = canvas.into_document();
        assert_eq!(doc.page_count(), 1);
        let page = doc.pages_in_order().next().expect("one page");
        assert!(matches!(page.contents[0], PageContents::RawContent(_)));
    }
}
