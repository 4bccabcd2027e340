use crate::refs::{ObjectReferences, RefType};
use pdf_writer::Pdf;

/// A constant-alpha graphics state (`ExtGState`), used to draw watermarks and
/// other see-through content. Register it with
/// [Document::add_opacity](crate::Document::add_opacity) and refer to it from an
/// [ImageLayout](crate::ImageLayout).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Opacity {
    alpha: f32,
}

impl Opacity {
    /// `alpha` is clamped into `0.0..=1.0`, 0 being invisible
    pub fn new(alpha: f32) -> Opacity {
        let alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        Opacity { alpha }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::GraphicsState(index));
        writer
            .ext_graphics(id)
            .non_stroking_alpha(self.alpha)
            .stroking_alpha(self.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Opacity::new(0.12).alpha(), 0.12);
        assert_eq!(Opacity::new(-0.5).alpha(), 0.0);
        assert_eq!(Opacity::new(3.0).alpha(), 1.0);
        assert_eq!(Opacity::new(f32::NAN).alpha(), 1.0);
    }
}
