use crate::{
    font::Font,
    image::Image,
    info::Info,
    opacity::Opacity,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default, Debug)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub opacities: Arena<Opacity>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Pages in the order they will be written
    pub fn pages_in_order(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within
    /// the document, such that any page can refer to them by id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Like fonts, images are shared by
    /// every page, so a logo repeated in every header is only embedded once.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Register a constant-alpha graphics state for see-through content
    pub fn add_opacity(&mut self, opacity: Opacity) -> Id<Opacity> {
        self.opacities.alloc(opacity)
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    ///
    /// Until `write` is called, all references are un-resolved. Calling `write` generates
    /// PDF objects and corresponding references to those objects.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
            opacities,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, font) in fonts.iter() {
            log::trace!("embedding font {} as F{}", font.display_name(), i.index());
            font.write(&mut refs, i.index(), &mut writer);
        }

        for (i, image) in images.iter() {
            image.write(&mut refs, i.index(), &mut writer);
        }

        for (i, opacity) in opacities.iter() {
            opacity.write(&mut refs, i.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(
                &mut refs,
                page_index,
                &fonts,
                &images,
                &opacities,
                &mut writer,
            )?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pagesize, StandardFont};

    #[test]
    fn writes_a_pdf() {
        let mut doc = Document::default();
        doc.add_font(Font::standard(StandardFont::Helvetica));
        doc.add_page(Page::new(pagesize::A4, None));
        doc.add_page(Page::new(pagesize::A4, None));
        assert_eq!(doc.page_count(), 2);

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");
        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/BaseFont /Helvetica"));
    }
}
