//! Length units used throughout the crate.
//!
//! All layout happens in PDF points ([Pt], 1/72 inch). [In] and [Mm] exist
//! for readability at call sites and convert into points.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    MulAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Self::Output {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Self::Output {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> Self::Output {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Self::Output {
        Pt(-self.0)
    }
}

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_and_millimetres_convert_to_points() {
        let one_inch: Pt = In(1.0).into();
        assert_eq!(one_inch, Pt(72.0));

        let a4_width: Pt = Mm(210.0).into();
        assert!((*a4_width - 595.2756).abs() < 0.01);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let mut x = Pt(10.0) + Pt(5.0) - Pt(3.0);
        x -= Pt(2.0);
        assert_eq!(x, Pt(10.0));
        assert_eq!(x * 1.5, Pt(15.0));
        assert_eq!(x / 4.0, Pt(2.5));
        assert_eq!(Pt(30.0) / Pt(10.0), 3.0);
        assert_eq!(-x, Pt(-10.0));

        let total: Pt = [Pt(1.0), Pt(2.0), Pt(3.5)].into_iter().sum();
        assert_eq!(total, Pt(6.5));
    }
}
