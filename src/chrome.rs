//! Page decorations. Every function draws onto the current page of a
//! [Canvas] using the canvas' brand for colours, images and contact details.
//!
//! Positions are fixed offsets from the page edges, laid out for A4 but
//! computed from the canvas size, so other page sizes stay usable.

use crate::brand::BrandColour;
use crate::canvas::{Canvas, PageChrome, TextStyle};
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use std::path::Path;

/// Left and right page margin used by all chrome
pub const SIDE_MARGIN: Pt = Pt(40.0);

/// Opacity [add_watermark] is normally called with
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.12;

const WATERMARK_SIZE: Pt = Pt(300.0);
const HAIRLINE: Pt = Pt(0.5);

fn colour(canvas: &Canvas<'_>, colour: BrandColour) -> crate::Colour {
    canvas.brand().colour(colour)
}

fn separator(canvas: &mut Canvas<'_>, y: Pt) {
    let line = colour(canvas, BrandColour::LightSilver);
    let right = canvas.width() - SIDE_MARGIN;
    canvas.stroke_line((SIDE_MARGIN, y), (right, y), HAIRLINE, line);
}

/// Logo at the top left, an optional right-aligned title and a hairline under
/// both. Without logo files a light silver box stands in for the logo; a logo
/// file that cannot be decoded is an error.
pub fn draw_header(canvas: &mut Canvas<'_>, title: Option<&str>) -> Result<(), PDFError> {
    let (w, h) = (canvas.width(), canvas.height());
    let assets = &canvas.brand().assets;

    let small = Rect::from_origin(SIDE_MARGIN, h - Pt(60.0), Pt(120.0), Pt(40.0));
    let fallback = Rect::from_origin(SIDE_MARGIN, h - Pt(55.0), Pt(80.0), Pt(32.0));
    let (logo_small, logo) = (assets.logo_small(), assets.logo());
    if !canvas.draw_image(&[logo_small], small, None)? && !canvas.draw_image(&[logo], fallback, None)?
    {
        let silver = colour(canvas, BrandColour::LightSilver);
        canvas.fill_rect(fallback, silver);
    }

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let style = TextStyle::bold(Pt(18.0), colour(canvas, BrandColour::Indigo));
        canvas.draw_text_right(w - SIDE_MARGIN, h - Pt(55.0), title, &style);
    }

    separator(canvas, h - Pt(80.0));
    Ok(())
}

/// A cyan accent bar down the top of the left edge, a large title with a muted
/// subtitle below it and a small logo at the top right
pub fn draw_modern_header(
    canvas: &mut Canvas<'_>,
    title: Option<&str>,
    subtitle: Option<&str>,
    logo: &str,
) -> Result<(), PDFError> {
    let (w, h) = (canvas.width(), canvas.height());

    let accent = colour(canvas, BrandColour::CyanTurquoise);
    canvas.fill_rect(Rect::from_origin(Pt(0.0), h - Pt(140.0), Pt(18.0), Pt(140.0)), accent);

    if let Some(title) = title {
        let style = TextStyle::bold(Pt(28.0), colour(canvas, BrandColour::Indigo));
        canvas.draw_text(SIDE_MARGIN, h - Pt(70.0), title, &style);
    }
    if let Some(subtitle) = subtitle {
        let style = TextStyle::regular(Pt(11.0), colour(canvas, BrandColour::LightSilver));
        canvas.draw_text(SIDE_MARGIN, h - Pt(92.0), subtitle, &style);
    }

    let slot = Rect::from_origin(w - Pt(140.0), h - Pt(90.0), Pt(100.0), Pt(40.0));
    let candidates = canvas.brand().assets.logo_candidates(logo);
    if !canvas.draw_image(&candidates, slot, None)? {
        let silver = colour(canvas, BrandColour::LightSilver);
        canvas.fill_rect(slot, silver);
    }
    Ok(())
}

/// Height of the band [draw_geometric_header] paints across the top of the page
pub const GEOMETRIC_BAND: Pt = Pt(90.0);

/// A full-width indigo band with a cyan wedge in the right corner, the logo
/// icon and the company name in white
pub fn draw_geometric_header(
    canvas: &mut Canvas<'_>,
    company: &str,
    logo: &str,
) -> Result<(), PDFError> {
    let (w, h) = (canvas.width(), canvas.height());
    let band_bottom = h - GEOMETRIC_BAND;

    let indigo = colour(canvas, BrandColour::Indigo);
    let cyan = colour(canvas, BrandColour::CyanTurquoise);
    canvas.fill_rect(Rect::from_origin(Pt(0.0), band_bottom, w, GEOMETRIC_BAND), indigo);
    canvas.fill_polygon(
        &[
            (w - Pt(180.0), h),
            (w, h),
            (w, band_bottom),
            (w - Pt(60.0), band_bottom),
        ],
        cyan,
    );
    canvas.stroke_line(
        (Pt(0.0), band_bottom - Pt(4.0)),
        (w, band_bottom - Pt(4.0)),
        Pt(1.5),
        cyan,
    );

    let icon = Rect::from_origin(SIDE_MARGIN, h - Pt(70.0), Pt(50.0), Pt(50.0));
    let candidates = canvas.brand().assets.logo_candidates(logo);
    let text_x = if canvas.draw_image(&candidates, icon, None)? {
        icon.x2 + Pt(14.0)
    } else {
        SIDE_MARGIN
    };

    let style = TextStyle::bold(Pt(16.0), colour(canvas, BrandColour::NeutralWhite));
    canvas.draw_text(text_x, h - Pt(52.0), company, &style);
    Ok(())
}

/// Date (right-aligned), recipient block and subject line of a letter. Returns
/// the baseline the letter body should start on.
pub fn draw_letter_details<S: AsRef<str>>(
    canvas: &mut Canvas<'_>,
    date: &str,
    recipient: &[S],
    subject: &str,
) -> Pt {
    let (w, h) = (canvas.width(), canvas.height());
    let indigo = colour(canvas, BrandColour::Indigo);

    canvas.draw_text_right(
        w - SIDE_MARGIN,
        h - Pt(110.0),
        date,
        &TextStyle::regular(Pt(10.0), indigo),
    );

    let body = TextStyle::regular(Pt(11.0), indigo);
    let leading = body.size * 1.2;
    let mut y = h - Pt(140.0);
    for line in recipient {
        canvas.draw_text(SIDE_MARGIN, y, line.as_ref(), &body);
        y -= leading;
    }

    let subject_y = (h - Pt(220.0)).min(y - leading);
    let label = "Subject: ";
    let bold = TextStyle::bold(Pt(11.0), indigo);
    canvas.draw_text(SIDE_MARGIN, subject_y, label, &bold);
    let label_width = canvas.text_width(label, &bold);
    canvas.draw_text(SIDE_MARGIN + label_width, subject_y, subject, &body);

    subject_y - Pt(30.0)
}

/// Two centred lines of company details above the bottom edge, under a hairline
pub fn draw_footer(canvas: &mut Canvas<'_>) {
    let w = canvas.width();
    let identity = &canvas.brand().identity;
    let style = TextStyle::regular(Pt(8.0), colour(canvas, BrandColour::Indigo));

    canvas.draw_text_centred(w / 2.0, Pt(45.0), &identity.legal_line, &style);
    canvas.draw_text_centred(w / 2.0, Pt(30.0), &identity.contact_line, &style);
    separator(canvas, Pt(65.0));
}

/// Bottom counterpart of [draw_geometric_header]: address and contact details
/// over a thin indigo band with a cyan accent
pub fn draw_geometric_footer(
    canvas: &mut Canvas<'_>,
    address: &str,
    email: &str,
    phone: &str,
    social: &str,
) {
    let w = canvas.width();
    let indigo = colour(canvas, BrandColour::Indigo);
    let cyan = colour(canvas, BrandColour::CyanTurquoise);

    separator(canvas, Pt(70.0));

    let style = TextStyle::regular(Pt(8.0), indigo);
    canvas.draw_text(SIDE_MARGIN, Pt(52.0), address, &style);
    let contact = [email, phone]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    canvas.draw_text(SIDE_MARGIN, Pt(38.0), &contact, &style);
    canvas.draw_text_right(w - SIDE_MARGIN, Pt(38.0), social, &style);

    canvas.fill_rect(Rect::from_origin(Pt(0.0), Pt(0.0), w, Pt(14.0)), indigo);
    canvas.fill_polygon(
        &[
            (Pt(0.0), Pt(0.0)),
            (w * 0.3, Pt(0.0)),
            (w * 0.3 - Pt(14.0), Pt(14.0)),
            (Pt(0.0), Pt(14.0)),
        ],
        cyan,
    );
}

/// A slim strip of contact details, joined with `|`, with optional social
/// handles right-aligned on the same baseline
pub fn draw_contact_strip<S: AsRef<str>>(
    canvas: &mut Canvas<'_>,
    contact_lines: &[S],
    social: &[S],
) {
    let w = canvas.width();
    let y = Pt(72.0);
    separator(canvas, y + Pt(28.0));

    let style = TextStyle::regular(Pt(9.0), colour(canvas, BrandColour::Indigo));
    let contact = contact_lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" | ");
    canvas.draw_text(SIDE_MARGIN, y + Pt(8.0), &contact, &style);

    if !social.is_empty() {
        let social = social
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        canvas.draw_text_right(w - SIDE_MARGIN, y + Pt(8.0), &social, &style);
    }
}

/// Centre a 300pt square image on the page at `opacity` (clamped into
/// `0.0..=1.0`). A missing image is not an error, nothing is drawn and `false`
/// returned. An image that cannot be decoded is.
pub fn add_watermark(
    canvas: &mut Canvas<'_>,
    image: &Path,
    opacity: f32,
) -> Result<bool, PDFError> {
    let (w, h) = (canvas.width(), canvas.height());
    let slot = Rect::from_origin(
        w / 2.0 - WATERMARK_SIZE / 2.0,
        h / 2.0 - WATERMARK_SIZE / 2.0,
        WATERMARK_SIZE,
        WATERMARK_SIZE,
    );
    let drawn = canvas.draw_image(&[image], slot, Some(opacity.clamp(0.0, 1.0)))?;
    if !drawn {
        log::info!("no watermark drawn, {} is unavailable", image.display());
    }
    Ok(drawn)
}

/// The simple header/footer pair with the brand watermark, for documents whose
/// body flows over several pages
pub struct StandardChrome<'t> {
    pub title: Option<&'t str>,
    pub watermark_opacity: f32,
}

impl PageChrome for StandardChrome<'_> {
    fn begin_page(&self, canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        draw_header(canvas, self.title)?;
        let watermark = canvas.brand().assets.watermark();
        add_watermark(canvas, &watermark, self.watermark_opacity)?;
        Ok(())
    }

    fn finish_page(&self, canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        draw_footer(canvas);
        Ok(())
    }
}

/// The geometric header/footer pair used on letters
pub struct GeometricChrome<'t> {
    pub company: &'t str,
    pub logo: &'t str,
    pub watermark: &'t Path,
    pub watermark_opacity: f32,
}

impl PageChrome for GeometricChrome<'_> {
    fn begin_page(&self, canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        draw_geometric_header(canvas, self.company, self.logo)?;
        add_watermark(canvas, self.watermark, self.watermark_opacity)?;
        Ok(())
    }

    fn finish_page(&self, canvas: &mut Canvas<'_>) -> Result<(), PDFError> {
        let identity = &canvas.brand().identity;
        draw_geometric_footer(
            canvas,
            &identity.address,
            &identity.email,
            &identity.phone,
            &identity.social,
        );
        Ok(())
    }
}
