use super::area::LayoutArea;

/// How much of a renderer's content a layout attempt placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    /// Everything was placed
    Full,
    /// Some content was placed; the rest is in the overflow renderer
    Partial,
    /// Nothing was placed
    Nothing,
}

/// The outcome of a layout attempt, shared by every kind of renderer.
///
/// * `Full`: the renderer itself is final; `split` and `overflow` are `None`.
/// * `Partial`: `split` holds what was placed and `overflow` what remains;
///   the caller must lay `overflow` out again in a later area.
/// * `Nothing`: no content was placed. `overflow` may carry the unplaced
///   content for renderers that hand it back (lines do); paragraphs leave it
///   empty and expect the caller to retry the same, unmodified fragment.
#[derive(Debug)]
pub struct LayoutResult<R> {
    pub status: LayoutStatus,
    pub occupied_area: LayoutArea,
    pub split: Option<R>,
    pub overflow: Option<R>,
    /// Set by line renderers when a partial result was caused by an
    /// explicit line break rather than running out of width
    pub split_forced_by_newline: bool,
}

impl<R> LayoutResult<R> {
    pub fn full(occupied_area: LayoutArea) -> LayoutResult<R> {
        LayoutResult {
            status: LayoutStatus::Full,
            occupied_area,
            split: None,
            overflow: None,
            split_forced_by_newline: false,
        }
    }

    pub fn partial(occupied_area: LayoutArea, split: R, overflow: R) -> LayoutResult<R> {
        LayoutResult {
            status: LayoutStatus::Partial,
            occupied_area,
            split: Some(split),
            overflow: Some(overflow),
            split_forced_by_newline: false,
        }
    }

    pub fn nothing(occupied_area: LayoutArea, overflow: Option<R>) -> LayoutResult<R> {
        LayoutResult {
            status: LayoutStatus::Nothing,
            occupied_area,
            split: None,
            overflow,
            split_forced_by_newline: false,
        }
    }

    pub fn forced_by_newline(mut self, forced: bool) -> LayoutResult<R> {
        self.split_forced_by_newline = forced;
        self
    }
}
