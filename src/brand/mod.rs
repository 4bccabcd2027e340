//! Everything that makes a document look like it came from one company: the
//! colour palette, the fonts, the image assets and the contact details printed
//! in headers and footers.
//!
//! A [Brand] is assembled once and passed by reference to every rendering
//! call. It is never modified while documents are drawn.

mod assets;
mod fonts;
mod palette;

pub use assets::*;
pub use fonts::*;
pub use palette::*;

use crate::colour::Colour;
use std::path::Path;

/// Company details printed by headers and footers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub company: String,
    /// First line of the simple footer
    pub legal_line: String,
    /// Second line of the simple footer
    pub contact_line: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub social: String,
}

impl Default for Identity {
    fn default() -> Self {
        Identity {
            company: "Access DiscreetKit Ltd".into(),
            legal_line: "Access DiscreetKit Ltd | Registered in Ghana".into(),
            contact_line: "www.discreetkit.com | info@discreetkit.com | +233 12 345 6789".into(),
            address: "House No. 57, Kofi Annan East Avenue, Madina, Accra".into(),
            email: "dscreetkit@gmail.com".into(),
            phone: "+233 20 300 1107".into(),
            social: "Twitter: @discreetkit | LinkedIn: /company/discreetkit".into(),
        }
    }
}

pub struct Brand {
    pub palette: Palette,
    pub assets: AssetPaths,
    pub identity: Identity,
    /// Tried in order for every weight
    pub font_providers: Vec<Box<dyn FontProvider>>,
}

impl Default for Brand {
    fn default() -> Self {
        Brand::from_assets(AssetPaths::default())
    }
}

impl Brand {
    /// The brand described by an asset directory: its `brand_colors.json` over
    /// the built-in colours, its Satoshi fonts over Helvetica
    pub fn from_assets(assets: AssetPaths) -> Brand {
        let palette = Palette::from_file(assets.palette_file());
        let font_providers: Vec<Box<dyn FontProvider>> = vec![
            Box::new(TrueTypeFiles {
                regular: assets.regular_font_candidates(),
                bold: assets.bold_font_candidates(),
            }),
            Box::new(StandardFonts),
        ];

        Brand {
            palette,
            assets,
            identity: Identity::default(),
            font_providers,
        }
    }

    /// Replace the palette with `path` layered over the built-in colours
    pub fn with_palette_file<P: AsRef<Path>>(mut self, path: P) -> Brand {
        self.palette = Palette::from_file(path);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Brand {
        self.palette = palette;
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Brand {
        self.identity = identity;
        self
    }

    pub fn with_font_providers(mut self, providers: Vec<Box<dyn FontProvider>>) -> Brand {
        self.font_providers = providers;
        self
    }

    pub fn colour(&self, colour: BrandColour) -> Colour {
        self.palette.colour(colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_palette_from_the_asset_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("brand_colors.json"),
            r##"{ "warm_brown": "#000000", "note": "not a colour" }"##,
        )
        .expect("can write");

        let brand = Brand::from_assets(AssetPaths::new(dir.path()));
        assert_eq!(brand.colour(BrandColour::WarmBrown), Colour::new_rgb(0.0, 0.0, 0.0));
        assert_eq!(
            brand.colour(BrandColour::Indigo),
            BrandColour::Indigo.default_colour()
        );
        assert_eq!(brand.font_providers.len(), 2);
    }
}
