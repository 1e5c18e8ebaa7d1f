use derive_more::{Add, AddAssign, Deref, Display, Div, From, Into, Mul, MulAssign, Neg, Sub, SubAssign, Sum};

/// A length in PDF points (1/72 of an inch). All layout coordinates are
/// expressed in points with the origin at the bottom-left of the page.
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
    Neg,
    Mul,
    MulAssign,
    Div,
    Sum,
    Deref,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Compare two lengths, tolerating the rounding noise that accumulates
    /// when boxes are repeatedly translated
    pub fn approx_eq(self, other: Pt) -> bool {
        (self.0 - other.0).abs() <= EPSILON
    }
}

/// Tolerance used when comparing coordinates
pub(crate) const EPSILON: f32 = 1e-3;

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, Div, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, Div, Display)]
#[display("{_0}mm")]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_imperial_and_metric() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!(Pt::from(Mm(25.4)).approx_eq(Pt(72.0)));
    }

    #[test]
    fn scalar_arithmetic() {
        let half = (Pt(10.0) - Pt(4.0)) / 2.0;
        assert_eq!(half, Pt(3.0));
        assert_eq!(-half * 2.0, Pt(-6.0));
        assert_eq!([Pt(1.0), Pt(2.5)].into_iter().sum::<Pt>(), Pt(3.5));
        assert_eq!(Pt(3.0).min(Pt(-1.0)), Pt(-1.0));
    }
}
