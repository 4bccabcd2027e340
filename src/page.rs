use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::opacity::Opacity;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Filter, Finish, Name, Pdf};

/// The font (and its size) a span of text is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text in one font and colour, with its baseline starting at
/// `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image stretched into `position`, optionally see-through
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
    pub opacity: Option<Id<Opacity>>,
}

/// Everything that can be drawn on a page, in painting order
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    /// Pre-rendered content stream operators (shapes, lines)
    RawContent(Vec<u8>),
}

/// A single page. Contents are painted in the order they were added, so
/// backgrounds such as watermarks go in first.
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// What to draw
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a new page of the given size. Without margins the content box covers
    /// the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    /// Move the content box in from the page edges
    pub fn set_margins(&mut self, margins: Margins) {
        self.content_box = Rect {
            x1: margins.left,
            y1: margins.bottom,
            x2: self.width() - margins.right,
            y2: self.height() - margins.top,
        };
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Add a span of text to the page, merging it into the previous text block
    /// when the two are adjacent
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Add arbitrary [pdf_writer::Content] (e.g. shapes) to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    /// All text drawn on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.as_slice(),
            _ => &[][..],
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        opacities: &Arena<Opacity>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get(RefType::Page(page_index)).ok_or(PDFError::PageMissing)?;
        let page_tree = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();

        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();

        let mut resource_states = resources.ext_g_states();
        for (state_id, _) in opacities.iter() {
            if let Some(state_ref) = refs.get(RefType::GraphicsState(state_id.index())) {
                resource_states.pair(Name(format!("GS{}", state_id.index()).as_bytes()), state_ref);
            }
        }
        resource_states.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
