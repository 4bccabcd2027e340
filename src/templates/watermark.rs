use super::info;
use crate::brand::Brand;
use crate::canvas::Canvas;
use crate::chrome::{self, DEFAULT_WATERMARK_OPACITY};
use crate::document::Document;
use crate::pagesize;
use crate::PDFError;

/// Blank A4 stationery: header, watermark and footer, no body
pub(crate) fn render(brand: &Brand) -> Result<Document, PDFError> {
    let mut canvas = Canvas::new(brand, pagesize::A4)?;
    canvas.set_info(info(brand, "Watermarked page"));

    chrome::draw_header(&mut canvas, None)?;
    chrome::add_watermark(&mut canvas, &brand.assets.watermark(), DEFAULT_WATERMARK_OPACITY)?;
    chrome::draw_footer(&mut canvas);
    canvas.show_page();
    Ok(canvas.into_document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::AssetPaths;
    use crate::page::PageContents;
    use image::{Rgba, RgbaImage};

    #[test]
    fn watermark_is_drawn_see_through_when_present() {
        let dir = tempfile::tempdir().expect("temp dir");
        RgbaImage::from_pixel(8, 8, Rgba([120, 120, 120, 255]))
            .save(dir.path().join("watermark.png"))
            .expect("can write png");

        let brand = Brand::from_assets(AssetPaths::new(dir.path()));
        let doc = render(&brand).expect("renders");
        assert_eq!(doc.page_count(), 1);

        let page = doc.pages_in_order().next().expect("a page");
        let watermark = page
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Image(image) => Some(image),
                _ => None,
            })
            .expect("watermark image");
        assert_eq!(watermark.position.width(), crate::Pt(300.0));
        let opacity = watermark.opacity.expect("see-through");
        assert_eq!(doc.opacities[opacity].alpha(), DEFAULT_WATERMARK_OPACITY);
    }
}
