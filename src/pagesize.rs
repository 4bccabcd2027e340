//! Page sizes for the paper formats branded documents are printed on.
//!
//! All sizes are portrait (width, height). Use [`PageOrientation`] to flip
//! between portrait and landscape.
//!
//! ```
//! use brand_docs::pagesize::{A4, PageOrientation};
//!
//! let (width, height) = A4.landscape();
//! assert!(width > height);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
/// Every template is laid out on A4
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        let (w, h) = self;
        if w <= h {
            (w, h)
        } else {
            (h, w)
        }
    }

    fn landscape(self) -> PageSize {
        let (w, h) = self;
        if w >= h {
            (w, h)
        } else {
            (h, w)
        }
    }
}
