use super::{info, TemplateContext};
use crate::brand::{Brand, BrandColour};
use crate::canvas::{Canvas, PageChrome, TextStyle};
use crate::chrome::{StandardChrome, DEFAULT_WATERMARK_OPACITY, SIDE_MARGIN};
use crate::document::Document;
use crate::layout::{FlowGeometry, Margins};
use crate::pagesize;
use crate::units::Pt;
use crate::PDFError;

/// A titled document whose body is stand-in text until the real wording is
/// supplied through [TemplateContext::body]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaceholderDocument {
    pub title: &'static str,
    pub body: &'static [&'static str],
}

pub(crate) const BOARD_RESOLUTION: PlaceholderDocument = PlaceholderDocument {
    title: "Board Resolution",
    body: &["[Board resolution content placeholder]"],
};

pub(crate) const CONTRACT: PlaceholderDocument = PlaceholderDocument {
    title: "Contract",
    body: &["[General contract placeholder - replace with agreement text]"],
};

pub(crate) const EMPLOYMENT_CONTRACT: PlaceholderDocument = PlaceholderDocument {
    title: "Employment Contract",
    body: &["[Employment contract placeholder - replace with agreement text]"],
};

pub(crate) const NDA: PlaceholderDocument = PlaceholderDocument {
    title: "Non-Disclosure Agreement",
    body: &["[Non-disclosure agreement placeholder - replace with agreement text]"],
};

pub(crate) const PRIVACY_POLICY: PlaceholderDocument = PlaceholderDocument {
    title: "Privacy Policy",
    body: &["[Privacy policy placeholder - replace with policy text]"],
};

pub(crate) const INVESTOR_BRIEF: PlaceholderDocument = PlaceholderDocument {
    title: "Investor Brief",
    body: &["[Investor brief placeholder - replace with brief text]"],
};

const BODY_SIZE: Pt = Pt(11.0);
const LEADING: Pt = Pt(15.0);
// first baseline, below the header title
const HEADER_CLEARANCE: Pt = Pt(120.0);
// the footer hairline sits at 65pt
const BOTTOM_RESERVED: Pt = Pt(80.0);

impl PlaceholderDocument {
    /// Header with the title, watermark, flowed body and footer on every page
    pub fn render(&self, brand: &Brand, context: &TemplateContext) -> Result<Document, PDFError> {
        let mut canvas = Canvas::new(brand, pagesize::A4)?;
        canvas.set_info(info(brand, self.title));
        canvas.set_margins(Margins::trbl(HEADER_CLEARANCE, SIDE_MARGIN, BOTTOM_RESERVED, SIDE_MARGIN));

        let page_chrome = StandardChrome {
            title: Some(self.title),
            watermark_opacity: DEFAULT_WATERMARK_OPACITY,
        };
        page_chrome.begin_page(&mut canvas)?;

        let geometry = FlowGeometry::within(canvas.content_box(), LEADING);
        let style = TextStyle::regular(BODY_SIZE, brand.colour(BrandColour::WarmBrown));
        match &context.body {
            Some(body) => canvas.flow(body.as_slice(), &style, &geometry, &page_chrome)?,
            None => canvas.flow(self.body, &style, &geometry, &page_chrome)?,
        };

        page_chrome.finish_page(&mut canvas)?;
        canvas.show_page();
        Ok(canvas.into_document())
    }
}
