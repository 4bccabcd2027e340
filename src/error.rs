use crate::layout::LayoutError;
use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("invalid palette file: {0}")]
    /// The palette file was not valid JSON, or not a JSON object
    Palette(#[from] serde_json::Error),

    #[error("invalid colour {0:?}, expected #RRGGBB")]
    /// A colour string was not a 6-digit hex colour
    InvalidColour(String),

    #[error("font file not found: {}", .0.display())]
    /// None of the candidate font files exist
    FontNotFound(PathBuf),

    #[error("no font provider could supply a {0} font")]
    /// Every provider in the font chain failed
    NoFont(&'static str),

    #[error("unknown template: {0}")]
    /// The template name is not registered
    UnknownTemplate(String),

    #[error(transparent)]
    /// The text flow geometry was rejected
    Layout(#[from] LayoutError),

    #[error("page missing from document")]
    /// The page order references a page that no longer exists
    PageMissing,
}
