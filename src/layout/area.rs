use crate::rect::Rect;
use crate::units::Pt;

/// Whether an area has a bottom edge.
///
/// Rotated content is laid out against an area without a bottom, since its
/// real footprint is only known once the rotated bounding box is computed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    #[default]
    Bounded,
    /// The area extends downward without limit; `bbox.y1` is kept only so
    /// the area can be collapsed back to its original bottom edge
    Unbounded,
}

/// A rectangle of placeable space on a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutArea {
    /// 0-based index of the page the area lives on
    pub page: usize,
    pub bbox: Rect,
    pub extent: Extent,
    /// Whether nothing else has been placed in this area yet
    pub empty: bool,
}

impl LayoutArea {
    pub fn new(page: usize, bbox: Rect) -> LayoutArea {
        LayoutArea {
            page,
            bbox,
            extent: Extent::Bounded,
            empty: true,
        }
    }

    /// Mark the area as already holding other content
    pub fn with_content(mut self) -> LayoutArea {
        self.empty = false;
        self
    }

    /// Drop the bottom edge of the area
    pub fn unbounded(mut self) -> LayoutArea {
        self.extent = Extent::Unbounded;
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.extent == Extent::Bounded
    }

    /// The same area with a different rectangle
    pub fn with_bbox(&self, bbox: Rect) -> LayoutArea {
        LayoutArea { bbox, ..*self }
    }

    /// Height available below `top`, or `None` when the area is unbounded
    pub fn height_below(&self, top: Pt) -> Option<Pt> {
        match self.extent {
            Extent::Bounded => Some(top - self.bbox.y1),
            Extent::Unbounded => None,
        }
    }

    /// Whether a box whose bottom edge sits at `y` would poke out of the area
    pub fn is_below_bottom(&self, y: Pt) -> bool {
        match self.extent {
            Extent::Bounded => y.0 < self.bbox.y1.0 - crate::units::EPSILON,
            Extent::Unbounded => false,
        }
    }
}

/// Supplies the regions a block may occupy within an area. Normally one,
/// more when the area is fragmented into columns or around exclusions.
pub trait AreaProvider: Send + Sync {
    /// Candidate rectangles, in the order they should be filled. Must not be
    /// empty.
    fn areas(&self, area: &LayoutArea) -> Vec<Rect>;
}

/// The whole area as a single region
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleArea;

impl AreaProvider for SingleArea {
    fn areas(&self, area: &LayoutArea) -> Vec<Rect> {
        vec![area.bbox]
    }
}

/// Equal-width columns, filled left to right
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub count: usize,
    pub gap: Pt,
}

impl AreaProvider for Columns {
    fn areas(&self, area: &LayoutArea) -> Vec<Rect> {
        let count = self.count.max(1);
        let width = (area.bbox.width() - self.gap * (count - 1) as f32) / count as f32;
        (0..count)
            .map(|i| {
                let x = area.bbox.x1 + (width + self.gap) * i as f32;
                Rect {
                    x1: x,
                    y1: area.bbox.y1,
                    x2: x + width,
                    y2: area.bbox.y2,
                }
            })
            .collect()
    }
}
