//! 2D affine transformations used for rotated layout and drawing.

use crate::rect::Rect;
use crate::units::*;
use pdf_writer::Content;

/// An affine transformation matrix in PDF order `[a b c d e f]`:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms can be chained using [`then`](Transform::then); operations
/// are applied in the order they're chained.
///
/// ```
/// use pdf_flow::{Transform, Pt};
///
/// // rotate a quarter turn, then move it 72 points right
/// let transform = Transform::rotate(std::f32::consts::FRAC_PI_2)
///     .with_translate(Pt(72.0), Pt(0.0));
/// let (x, y) = transform.apply(Pt(10.0), Pt(0.0));
/// assert!((x.0 - 72.0).abs() < 1e-4 && (y.0 - 10.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Transform::identity()
        }
    }

    /// Counter-clockwise rotation about the origin (angle in radians)
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about an arbitrary pivot point
    pub fn rotate_about(angle: f32, x: Pt, y: Pt) -> Self {
        Transform::translate(-x, -y)
            .then(Transform::rotate(angle))
            .with_translate(x, y)
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn with_translate(self, x: Pt, y: Pt) -> Self {
        self.then(Transform::translate(x, y))
    }

    /// Map a point through the transform
    pub fn apply(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            Pt(self.a * x.0 + self.c * y.0 + self.e),
            Pt(self.b * x.0 + self.d * y.0 + self.f),
        )
    }

    /// The axis-aligned bounding box of `rect` after transformation
    pub fn bounding_box(&self, rect: &Rect) -> Rect {
        let corners = [
            self.apply(rect.x1, rect.y1),
            self.apply(rect.x2, rect.y1),
            self.apply(rect.x1, rect.y2),
            self.apply(rect.x2, rect.y2),
        ];
        let (x0, y0) = corners[0];
        corners.iter().skip(1).fold(
            Rect {
                x1: x0,
                y1: y0,
                x2: x0,
                y2: y0,
            },
            |bbox, &(x, y)| Rect {
                x1: bbox.x1.min(x),
                y1: bbox.y1.min(y),
                x2: bbox.x2.max(x),
                y2: bbox.y2.max(y),
            },
        )
    }

    /// Write the transform to a PDF content stream
    pub fn write_to_content(&self, content: &mut Content) {
        content.transform([self.a, self.b, self.c, self.d, self.e, self.f]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_swaps_extents() {
        let rect = Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(100.0), Pt(20.0));
        let bbox = Transform::rotate(FRAC_PI_2).bounding_box(&rect);
        assert!(bbox.width().approx_eq(Pt(20.0)));
        assert!(bbox.height().approx_eq(Pt(100.0)));
    }

    #[test]
    fn pivot_stays_put() {
        let t = Transform::rotate_about(1.0, Pt(30.0), Pt(40.0));
        let (x, y) = t.apply(Pt(30.0), Pt(40.0));
        assert!(x.approx_eq(Pt(30.0)) && y.approx_eq(Pt(40.0)));
    }
}
