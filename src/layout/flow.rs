use super::area::LayoutArea;
use super::paragraph::Paragraph;
use super::renderer::{LineRenderer, Renderer};
use super::result::LayoutStatus;
use crate::LayoutError;
use log::debug;

/// Lay a paragraph out across as many areas as it needs.
///
/// `next_area` is called with 0, 1, 2, ... and must return the area to try
/// next, typically the content box of a fresh page. A partial result moves
/// on with the continuation fragment. When nothing fits, the same fragment
/// is retried on the next area, unless the area was empty, in which case
/// no later area can do better and [`LayoutError::ContentDoesNotFit`] is
/// returned.
///
/// Returns the placed fragments in order, each ready to be drawn.
pub fn paginate<L, F>(
    paragraph: Paragraph<L>,
    mut next_area: F,
) -> Result<Vec<Paragraph<L>>, LayoutError>
where
    L: LineRenderer,
    F: FnMut(usize) -> LayoutArea,
{
    let mut placed = Vec::new();
    let mut pending = paragraph;
    let mut attempt = 0;

    loop {
        let area = next_area(attempt);
        attempt += 1;

        let result = pending.layout(&area);
        match result.status {
            LayoutStatus::Full => {
                placed.push(pending);
                return Ok(placed);
            }
            LayoutStatus::Partial => {
                let (Some(split), Some(overflow)) = (result.split, result.overflow) else {
                    return Err(LayoutError::MissingContinuation { page: area.page });
                };
                debug!("paragraph continues after page {}", area.page);
                placed.push(split);
                pending = overflow;
            }
            LayoutStatus::Nothing if area.empty => {
                return Err(LayoutError::ContentDoesNotFit { page: area.page });
            }
            LayoutStatus::Nothing => {
                debug!("nothing fits on page {}, retrying on the next area", area.page);
            }
        }
    }
}
