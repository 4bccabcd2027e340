use brand_docs::brand::{AssetPaths, Brand, BrandColour, FontProvider, Palette, StandardFonts};
use brand_docs::templates::{self, TemplateContext, TemplateKind};
use brand_docs::{Colour, Font, PDFError, StandardFont};
use chrono::NaiveDate;

fn context() -> TemplateContext {
    TemplateContext::default().with_date(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"))
}

#[test]
fn every_template_renders_a_pdf() {
    let assets = tempfile::tempdir().expect("temp dir");
    let out = tempfile::tempdir().expect("temp dir");
    let brand = Brand::from_assets(AssetPaths::new(assets.path()));

    for kind in TemplateKind::ALL {
        let path = out.path().join("nested/dir").join(kind.default_file_name());
        templates::generate(kind, &brand, &context(), &path)
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));

        let bytes = std::fs::read(&path).expect("file was written");
        assert!(bytes.starts_with(b"%PDF-"), "{kind} is not a PDF");
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }
}

#[test]
fn palette_file_overrides_defaults() {
    let assets = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        assets.path().join("brand_colors.json"),
        r##"{
            "indigo": "#112233",
            "light_silver": "silver",
            "cyan_turquoise": 42
        }"##,
    )
    .expect("can write palette");

    let brand = Brand::from_assets(AssetPaths::new(assets.path()));
    assert_eq!(
        brand.colour(BrandColour::Indigo),
        Colour::new_rgb_bytes(0x11, 0x22, 0x33)
    );
    assert_eq!(
        brand.colour(BrandColour::LightSilver),
        BrandColour::LightSilver.default_colour()
    );
    assert_eq!(
        brand.colour(BrandColour::CyanTurquoise),
        BrandColour::CyanTurquoise.default_colour()
    );

    // the letterhead body is set in indigo
    let doc = TemplateKind::Letterhead
        .render(&brand, &context())
        .expect("renders");
    let page = doc.pages_in_order().next().expect("a page");
    let dear = page
        .spans()
        .find(|s| s.text == "Dear Mr. Doe,")
        .expect("salutation");
    assert_eq!(dear.colour, Colour::new_rgb_bytes(0x11, 0x22, 0x33));
}

#[test]
fn explicit_palette_replaces_the_asset_palette() {
    let dir = tempfile::tempdir().expect("temp dir");
    let palette = dir.path().join("other.json");
    std::fs::write(&palette, r##"{ "warm_brown": "#010203" }"##).expect("can write palette");

    let brand = Brand::from_assets(AssetPaths::new(dir.path())).with_palette_file(&palette);
    assert_eq!(
        brand.colour(BrandColour::WarmBrown),
        Colour::new_rgb_bytes(1, 2, 3)
    );

    let defaults = Brand::default().with_palette(Palette::defaults());
    assert_eq!(
        defaults.colour(BrandColour::WarmBrown),
        BrandColour::WarmBrown.default_colour()
    );
}

#[test]
fn fonts_fall_back_to_helvetica() {
    let assets = tempfile::tempdir().expect("temp dir");
    // a file that exists but is not a font
    std::fs::create_dir_all(assets.path().join("fonts")).expect("can create dir");
    std::fs::write(assets.path().join("fonts/Satoshi-Regular.ttf"), b"nope").expect("can write");

    let brand = Brand::from_assets(AssetPaths::new(assets.path()));
    let doc = TemplateKind::CoverPage
        .render(&brand, &context())
        .expect("renders");

    let names: Vec<String> = doc.fonts.iter().map(|(_, f)| f.display_name()).collect();
    assert_eq!(names, vec!["Helvetica", "Helvetica-Bold"]);
    assert!(doc
        .fonts
        .iter()
        .all(|(_, f)| matches!(f, Font::Standard(StandardFont::Helvetica | StandardFont::HelveticaBold))));
}

struct NoFonts;

impl FontProvider for NoFonts {
    fn describe(&self) -> String {
        "nothing".into()
    }

    fn provide(&self, weight: brand_docs::brand::Weight) -> Result<Font, PDFError> {
        Err(PDFError::NoFont(weight.name()))
    }
}

#[test]
fn rendering_without_any_font_fails() {
    let brand = Brand::default().with_font_providers(vec![Box::new(NoFonts)]);
    let err = TemplateKind::Nda
        .render(&brand, &context())
        .expect_err("no fonts");
    assert!(matches!(err, PDFError::NoFont("regular")));

    let brand = Brand::default().with_font_providers(vec![Box::new(NoFonts), Box::new(StandardFonts)]);
    assert!(TemplateKind::Nda.render(&brand, &context()).is_ok());
}

#[test]
fn long_bodies_span_several_pages() {
    let brand = Brand::from_assets(AssetPaths::new("/no/such/brand/assets"));
    let body: Vec<String> = (0..20).map(|_| lipsum::lipsum(150)).collect();
    let context = context().with_body(body);

    for kind in [TemplateKind::Letterhead, TemplateKind::PrivacyPolicy] {
        let doc = kind.render(&brand, &context).expect("renders");
        assert!(doc.page_count() > 1, "{kind} did not paginate");

        let mut out = Vec::new();
        doc.write(&mut out).expect("writes");
        assert!(out.starts_with(b"%PDF-"));
    }
}

#[test]
fn letters_print_the_context_date() {
    let brand = Brand::from_assets(AssetPaths::new("/no/such/brand/assets"));
    let doc = TemplateKind::Letterhead
        .render(&brand, &context())
        .expect("renders");
    let page = doc.pages_in_order().next().expect("a page");
    assert!(page.spans().any(|s| s.text == "01 March 2024"));
}
