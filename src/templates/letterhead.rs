use super::{info, TemplateContext};
use crate::brand::{Brand, BrandColour, Weight};
use crate::canvas::{Canvas, PageChrome, TextStyle};
use crate::chrome::{self, GeometricChrome, GEOMETRIC_BAND};
use crate::document::Document;
use crate::layout::{Flow, FlowGeometry, Margins};
use crate::pagesize;
use crate::units::{In, Pt};
use crate::PDFError;

/// The contents of a letter
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub recipient: Vec<String>,
    pub subject: String,
    /// Wrapped paragraphs, separated by blank lines
    pub body: Vec<String>,
    /// Lines printed as-is after the body, one blank line below it
    pub signature: Vec<String>,
    /// Image name looked up in the asset directory and its `logos/` folder
    pub logo: String,
    pub watermark_opacity: f32,
}

impl Default for Letter {
    fn default() -> Self {
        let owned = |lines: &[&str]| lines.iter().map(|l| l.to_string()).collect();
        Letter {
            recipient: owned(&[
                "Mr. John Doe",
                "Chief Executive Officer",
                "Innovate Corp.",
                "123 Innovation Drive, Accra, Ghana",
            ]),
            subject: "Proposal for Strategic Partnership".into(),
            body: owned(&[
                "Dear Mr. Doe,",
                "We are writing to propose a strategic partnership between Access DiscreetKit \
                 Ltd and Innovate Corp. Our goal is to leverage our combined strengths to drive \
                 innovation and create mutually beneficial opportunities.",
                "Our analysis indicates that a collaboration could unlock significant value in \
                 the market. We have attached a detailed proposal for your review and would be \
                 pleased to discuss this further at your convenience.",
                "Thank you for considering our proposal. We look forward to the possibility of \
                 working together.",
                "Sincerely,",
            ]),
            signature: owned(&[
                "Jane Smith",
                "Director of Business Development",
                "Access DiscreetKit Ltd",
            ]),
            logo: "Artboard 2.png".into(),
            watermark_opacity: 0.04,
        }
    }
}

const BODY_SIZE: Pt = Pt(11.0);
const LEADING: Pt = Pt(15.0);
// clear of the geometric footer's hairline at 70pt
const BOTTOM_RESERVED: Pt = Pt(90.0);

/// The geometric letterhead with a flowed letter body. Long letters continue
/// on further pages, each with the full header and footer.
pub(crate) fn render(
    brand: &Brand,
    context: &TemplateContext,
    letter: &Letter,
) -> Result<Document, PDFError> {
    let mut canvas = Canvas::new(brand, pagesize::A4)?;
    canvas.set_info({
        let mut info = info(brand, "Letterhead");
        info.subject(&letter.subject);
        info
    });
    let margin: Pt = In(1.0).into();
    canvas.set_margins(Margins::trbl(GEOMETRIC_BAND + Pt(40.0), margin, BOTTOM_RESERVED, margin));

    let company = brand.identity.company.to_uppercase();
    let watermark = brand.assets.watermark();
    let page_chrome = GeometricChrome {
        company: &company,
        logo: &letter.logo,
        watermark: &watermark,
        watermark_opacity: letter.watermark_opacity,
    };

    page_chrome.begin_page(&mut canvas)?;
    let body_start = chrome::draw_letter_details(
        &mut canvas,
        &context.date_line(),
        letter.recipient.as_slice(),
        &letter.subject,
    );

    let geometry = FlowGeometry {
        start_y: body_start,
        ..FlowGeometry::within(canvas.content_box(), LEADING)
    };
    let style = TextStyle::regular(BODY_SIZE, brand.colour(BrandColour::Indigo));

    let instructions = {
        let mut flow = Flow::new(geometry, style.size, canvas.font(Weight::Regular))?;
        match &context.body {
            Some(body) => flow.paragraphs(body.as_slice()),
            None => flow.paragraphs(letter.body.as_slice()),
        }
        flow.blank_line();
        for line in &letter.signature {
            flow.line(line);
        }
        flow.finish()
    };
    canvas.run(instructions, &style, &page_chrome)?;

    page_chrome.finish_page(&mut canvas)?;
    canvas.show_page();
    Ok(canvas.into_document())
}
