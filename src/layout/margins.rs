use crate::units::Pt;

/// The text area of a page, as distances in from each edge. Nothing stops
/// chrome from drawing outside it; flows stay inside (see
/// [FlowGeometry::within](crate::layout::FlowGeometry::within)). Pages write
/// the resulting content box out as their art box.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all(value: Pt) -> Margins {
        Margins::trbl(value, value, value, value)
    }
}
