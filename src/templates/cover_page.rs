use super::info;
use crate::brand::{Brand, BrandColour};
use crate::canvas::{Canvas, TextStyle};
use crate::chrome::{self, DEFAULT_WATERMARK_OPACITY};
use crate::document::Document;
use crate::pagesize;
use crate::units::Pt;
use crate::PDFError;

/// Big centred title and subtitle for the front of a pack
#[derive(Debug, Clone, PartialEq)]
pub struct CoverPage {
    pub title: String,
    pub subtitle: String,
}

impl Default for CoverPage {
    fn default() -> Self {
        CoverPage {
            title: "Access DiscreetKit".into(),
            subtitle: "Investor Pack".into(),
        }
    }
}

pub(crate) fn render(brand: &Brand, cover: &CoverPage) -> Result<Document, PDFError> {
    let mut canvas = Canvas::new(brand, pagesize::A4)?;
    canvas.set_info(info(brand, &cover.subtitle));
    let (w, h) = (canvas.width(), canvas.height());

    chrome::draw_header(&mut canvas, None)?;

    let brown = brand.colour(BrandColour::WarmBrown);
    canvas.draw_text_centred(
        w / 2.0,
        h / 2.0 + Pt(20.0),
        &cover.title,
        &TextStyle::bold(Pt(28.0), brown),
    );
    canvas.draw_text_centred(
        w / 2.0,
        h / 2.0 - Pt(10.0),
        &cover.subtitle,
        &TextStyle::regular(Pt(14.0), brown),
    );

    chrome::add_watermark(&mut canvas, &brand.assets.watermark(), DEFAULT_WATERMARK_OPACITY)?;
    chrome::draw_footer(&mut canvas);
    canvas.show_page();
    Ok(canvas.into_document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::AssetPaths;

    #[test]
    fn title_is_centred() {
        let brand = Brand::from_assets(AssetPaths::new("/no/such/brand/assets"));
        let doc = render(&brand, &CoverPage::default()).expect("renders");
        let page = doc.pages_in_order().next().expect("a page");

        let title = page
            .spans()
            .find(|s| s.text == "Access DiscreetKit")
            .expect("title");
        let width = doc.fonts[title.font.id]
            .width_of(&title.text, title.font.size)
            .expect("ascii");
        let centre = title.coords.0 + width / 2.0;
        assert!((*centre - *(page.width() / 2.0)).abs() < 1e-3);
    }
}
