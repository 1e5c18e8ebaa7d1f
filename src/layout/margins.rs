use crate::rect::Rect;
use crate::units::Pt;

/// Insets on the four sides of a box. The same type describes margins,
/// border widths and padding; the paragraph engine applies them inward
/// before laying out lines and reverses them afterwards.
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
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sides().iter().all(|side| *side == Pt::ZERO)
    }

    pub(crate) fn sides(&self) -> [Pt; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Shrink `rect` by the insets, or grow it back when `reverse` is set.
    /// `reverse` is used once the children have been laid out and the
    /// occupied area must account for the space around them.
    pub fn apply(&self, rect: &Rect, reverse: bool) -> Rect {
        let sign = if reverse { -1.0 } else { 1.0 };
        Rect {
            x1: rect.x1 + self.left * sign,
            y1: rect.y1 + self.bottom * sign,
            x2: rect.x2 - self.right * sign,
            y2: rect.y2 - self.top * sign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_reverse_is_identity() {
        let rect = Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(200.0), Pt(100.0));
        let margins = Margins::trbl(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0));
        let inner = margins.apply(&rect, false);
        assert_eq!(inner, Rect::from_xywh(Pt(4.0), Pt(3.0), Pt(194.0), Pt(96.0)));
        assert_eq!(margins.apply(&inner, true), rect);
    }
}
