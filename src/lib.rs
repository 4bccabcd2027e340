//! Branded PDF documents: letterheads, board resolutions, contracts, cover
//! pages and watermarked pages.
//!
//! The crate is layered. At the bottom sits a small PDF object model
//! ([Document], [Page], [Font], [Image]) on top of [pdf_writer]. The
//! [layout] module holds the text flow engine, which turns paragraphs into
//! positioned lines and page breaks. A [Canvas] wraps a document with a
//! current page and drawing primitives, [chrome] draws headers and footers
//! from a [Brand], and [templates] compose all of it into finished documents.

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod opacity;
pub use opacity::*;

mod page;
pub use page::*;

/// Standard paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

mod content;

/// Brand configuration: palette, fonts and image assets
pub mod brand;
pub use brand::Brand;

mod canvas;
pub use canvas::*;

/// Headers, footers, watermarks and other decorations drawn around body text
pub mod chrome;

/// The document templates
pub mod templates;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
