use super::area::LayoutArea;
use super::config::{Leading, TabSettings};
use super::result::LayoutResult;
use crate::canvas::Canvas;
use crate::units::Pt;

/// The contract shared by every kind of renderer: lay out into an area,
/// move rigidly, draw, and report the first baseline.
pub trait Renderer: Sized {
    /// Attempt to place the renderer's content within `area`
    fn layout(&mut self, area: &LayoutArea) -> LayoutResult<Self>;

    /// Translate everything already laid out right by `dx` and up by `dy`
    /// without laying it out again
    fn move_by(&mut self, dx: Pt, dy: Pt);

    fn draw(&self, canvas: &mut Canvas);

    /// Baseline of the first line of laid-out content, if any
    fn first_baseline(&self) -> Option<Pt>;

    /// Area occupied by the most recent layout, if it ran
    fn occupied_area(&self) -> Option<&LayoutArea>;
}

/// A single line of inline content, as driven by the paragraph engine.
///
/// After [`layout`](Renderer::layout) returns `Full`, the line itself is the
/// laid-out line. After `Partial`, the `split` line is laid out and holds
/// the content that fit; the `overflow` line holds the rest, not yet laid
/// out. After `Nothing`, `overflow` holds all of the line's children.
pub trait LineRenderer: Renderer {
    /// The inline items a line is built from
    type Child: Clone;
    /// Shared state every line of a paragraph is created with (e.g. font
    /// metrics)
    type Context: Clone;

    fn new(context: &Self::Context, children: Vec<Self::Child>) -> Self;

    fn children(&self) -> &[Self::Child];

    fn into_children(self) -> Vec<Self::Child>;

    fn set_tabs(&mut self, tabs: &TabSettings);

    /// Widen the gaps between words so the line spans `width`. Calling it
    /// again with the same width changes nothing.
    fn justify(&mut self, width: Pt);

    /// The line's baseline y coordinate
    fn baseline(&self) -> Pt;

    /// The lowest descent of anything on the line (negative, below the
    /// baseline)
    fn max_descent(&self) -> Pt;

    fn contains_image(&self) -> bool;

    /// The leading this line contributes under `leading`
    fn leading_value(&self, leading: &Leading) -> Pt;
}
