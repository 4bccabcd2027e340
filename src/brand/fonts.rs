//! Font registration.
//!
//! Each weight is resolved separately by walking an ordered list of
//! [FontProvider]s until one supplies a font. The usual chain is the brand's
//! TrueType files followed by the standard Helvetica faces, which cannot fail.

use crate::document::Document;
use crate::font::{Font, StandardFont};
use crate::PDFError;
use id_arena::Id;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Weight {
    Regular,
    Bold,
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Weight {
    pub fn name(&self) -> &'static str {
        match self {
            Weight::Regular => "regular",
            Weight::Bold => "bold",
        }
    }
}

/// One link in a font fallback chain
pub trait FontProvider {
    /// For log messages
    fn describe(&self) -> String;

    fn provide(&self, weight: Weight) -> Result<Font, PDFError>;
}

/// TrueType/OpenType files on disk, tried in order. Files that are missing are
/// skipped quietly, files that fail to parse are skipped with a warning.
#[derive(Debug, Clone, Default)]
pub struct TrueTypeFiles {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
}

impl FontProvider for TrueTypeFiles {
    fn describe(&self) -> String {
        let first = self.regular.first().or(self.bold.first());
        match first {
            Some(path) => format!("TrueType files ({}, ...)", path.display()),
            None => "TrueType files (none)".into(),
        }
    }

    fn provide(&self, weight: Weight) -> Result<Font, PDFError> {
        let candidates = match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        };

        let mut last_error = None;
        for path in candidates.iter().filter(|p| p.is_file()) {
            match std::fs::read(path)
                .map_err(PDFError::from)
                .and_then(Font::load)
            {
                Ok(font) => {
                    log::debug!("loaded {weight} font from {}", path.display());
                    return Ok(font);
                }
                Err(e) => {
                    log::warn!("cannot use {} as a {weight} font: {e}", path.display());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            PDFError::FontNotFound(candidates.first().cloned().unwrap_or_default())
        }))
    }
}

/// Helvetica and Helvetica-Bold, which every reader has
#[derive(Debug, Copy, Clone, Default)]
pub struct StandardFonts;

impl FontProvider for StandardFonts {
    fn describe(&self) -> String {
        "standard Helvetica".into()
    }

    fn provide(&self, weight: Weight) -> Result<Font, PDFError> {
        Ok(Font::standard(match weight {
            Weight::Regular => StandardFont::Helvetica,
            Weight::Bold => StandardFont::HelveticaBold,
        }))
    }
}

/// The fonts registered in a document, one per weight
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSet {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
}

impl FontSet {
    /// Resolve both weights through `providers` and add the results to `doc`
    pub fn register(
        providers: &[Box<dyn FontProvider>],
        doc: &mut Document,
    ) -> Result<FontSet, PDFError> {
        let regular = doc.add_font(provide(providers, Weight::Regular)?);
        let bold = doc.add_font(provide(providers, Weight::Bold)?);
        Ok(FontSet { regular, bold })
    }

    pub fn get(&self, weight: Weight) -> Id<Font> {
        match weight {
            Weight::Regular => self.regular,
            Weight::Bold => self.bold,
        }
    }
}

fn provide(providers: &[Box<dyn FontProvider>], weight: Weight) -> Result<Font, PDFError> {
    for provider in providers {
        match provider.provide(weight) {
            Ok(font) => return Ok(font),
            Err(e) => log::debug!("{} has no {weight} font: {e}", provider.describe()),
        }
    }
    Err(PDFError::NoFont(weight.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_helvetica() {
        let providers: Vec<Box<dyn FontProvider>> = vec![
            Box::new(TrueTypeFiles {
                regular: vec![PathBuf::from("/nope/Satoshi-Regular.ttf")],
                bold: vec![PathBuf::from("/nope/Satoshi-Bold.ttf")],
            }),
            Box::new(StandardFonts),
        ];
        let mut doc = Document::default();
        let fonts = FontSet::register(&providers, &mut doc).expect("helvetica never fails");

        assert!(matches!(
            doc.fonts.get(fonts.regular),
            Some(Font::Standard(StandardFont::Helvetica))
        ));
        assert!(matches!(
            doc.fonts.get(fonts.get(Weight::Bold)),
            Some(Font::Standard(StandardFont::HelveticaBold))
        ));
    }

    #[test]
    fn unparseable_files_are_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Broken.ttf");
        std::fs::write(&path, b"not a font").expect("can write");

        let files = TrueTypeFiles {
            regular: vec![dir.path().join("Missing.ttf"), path],
            bold: Vec::new(),
        };
        assert!(matches!(
            files.provide(Weight::Regular),
            Err(PDFError::FaceParsingError(_))
        ));
        assert!(matches!(
            files.provide(Weight::Bold),
            Err(PDFError::FontNotFound(_))
        ));
    }

    #[test]
    fn an_exhausted_chain_is_an_error() {
        let mut doc = Document::default();
        let providers: Vec<Box<dyn FontProvider>> = vec![Box::new(TrueTypeFiles::default())];
        assert!(matches!(
            FontSet::register(&providers, &mut doc),
            Err(PDFError::NoFont("regular"))
        ));
    }
}
