//! The paragraph engine: stacks lines produced by a [`LineRenderer`] into a
//! sequence of areas, splitting into continuation fragments when the areas
//! run out.

use super::area::{AreaProvider, LayoutArea, SingleArea};
use super::config::{ParagraphConfig, TextAlignment, VerticalAlignment};
use super::renderer::{LineRenderer, Renderer};
use super::result::{LayoutResult, LayoutStatus};
use crate::canvas::Canvas;
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use crate::LayoutError;
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;

/// One placement attempt's worth of a paragraph: either the whole paragraph
/// or a continuation of one that overflowed an earlier area.
///
/// ```
/// use std::sync::Arc;
/// use pdf_flow::layout::{Inline, LayoutArea, LayoutStatus, Leading, Line, Paragraph, ParagraphConfig, Renderer};
/// use pdf_flow::{Metrics, MonoMetrics, Pt, Rect, SpanFont};
///
/// let metrics: Arc<dyn Metrics> = Arc::new(MonoMetrics::default());
/// let font = SpanFont { id: 0, size: Pt(10.0) };
/// let mut config = ParagraphConfig::new();
/// config.leading(Leading::Fixed(Pt(12.0)));
///
/// let mut paragraph: Paragraph<Line> =
///     Paragraph::new(config, metrics, vec![Inline::text("one two three four", font)])
///         .expect("valid configuration");
/// let area = LayoutArea::new(0, Rect::from_xywh(Pt(72.0), Pt(72.0), Pt(50.0), Pt(600.0)));
/// let result = paragraph.layout(&area);
/// assert_eq!(result.status, LayoutStatus::Full);
/// assert_eq!(paragraph.lines().len(), 2);
/// ```
pub struct Paragraph<L: LineRenderer> {
    config: Arc<ParagraphConfig>,
    line_context: L::Context,
    area_provider: Arc<dyn AreaProvider>,
    children: Vec<L::Child>,
    lines: Vec<L>,
    occupied: Option<LayoutArea>,
    previous_descent: Pt,
    last_fragment: bool,
    rotation: Option<Transform>,
}

impl<L: LineRenderer> Paragraph<L> {
    /// Create a paragraph from its inline children. Fails if the
    /// configuration holds lengths the engine cannot lay out.
    pub fn new(
        config: ParagraphConfig,
        line_context: L::Context,
        children: Vec<L::Child>,
    ) -> Result<Paragraph<L>, LayoutError> {
        config.validate()?;
        Ok(Paragraph {
            config: Arc::new(config),
            line_context,
            area_provider: Arc::new(SingleArea),
            children,
            lines: Vec::new(),
            occupied: None,
            previous_descent: Pt::ZERO,
            last_fragment: true,
            rotation: None,
        })
    }

    /// Replace the default single-region provider, e.g. to flow into columns
    pub fn with_area_provider(mut self, provider: Arc<dyn AreaProvider>) -> Paragraph<L> {
        self.area_provider = provider;
        self
    }

    pub fn config(&self) -> &ParagraphConfig {
        &self.config
    }

    /// Inline children backing this fragment
    pub fn children(&self) -> &[L::Child] {
        &self.children
    }

    /// Lines placed by the last successful layout
    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    /// Whether this fragment ends the logical paragraph. Fragments split off
    /// the head of an overflowing paragraph are not last.
    pub fn is_last_fragment(&self) -> bool {
        self.last_fragment
    }

    fn fragment(&self, config: Arc<ParagraphConfig>, children: Vec<L::Child>) -> Paragraph<L> {
        Paragraph {
            config,
            line_context: self.line_context.clone(),
            area_provider: Arc::clone(&self.area_provider),
            children,
            lines: Vec::new(),
            occupied: None,
            previous_descent: Pt::ZERO,
            last_fragment: true,
            rotation: None,
        }
    }

    /// A fresh fragment for content that did not fit. Continuations never
    /// indent their first line.
    fn overflow_fragment(&self, children: Vec<L::Child>) -> Paragraph<L> {
        let config = if self.config.first_line_indent != Pt::ZERO {
            let mut config = (*self.config).clone();
            config.first_line_indent = Pt::ZERO;
            Arc::new(config)
        } else {
            Arc::clone(&self.config)
        };
        self.fragment(config, children)
    }

    /// Build the continuation pair: a non-last fragment owning `lines` at
    /// `occupied`, and a fresh fragment holding `pending` to lay out later
    fn split(
        &self,
        occupied: LayoutArea,
        lines: Vec<L>,
        pending: Vec<L::Child>,
    ) -> (Paragraph<L>, Paragraph<L>) {
        let mut retained = self.fragment(Arc::clone(&self.config), Vec::new());
        retained.children = lines
            .iter()
            .flat_map(|line| line.children().iter().cloned())
            .collect();
        retained.lines = lines;
        retained.occupied = Some(occupied);
        retained.last_fragment = false;

        (retained, self.overflow_fragment(pending))
    }

    /// Shrink the caller's area to the rectangle lines are laid out in
    fn prepare_area(&self, area: &LayoutArea) -> LayoutArea {
        let config = &self.config;
        let mut parent = *area;
        if config.rotation.is_some() {
            parent = parent.unbounded();
        }

        let mut bbox = config.margins.apply(&parent.bbox, false);
        bbox = config.borders.apply(&bbox, false);

        if let Some(position) = config.position {
            let origin = if config.fixed_layout { Pt::ZERO } else { bbox.x1 };
            let width = bbox.width();
            bbox.x1 = origin + position.x;
            bbox.x2 = bbox.x1 + width;
        }

        if let Some(width) = config.width {
            let width = width.resolve(bbox.width());
            if width < bbox.width() || config.is_positioned() {
                bbox.x2 = bbox.x1 + width;
            }
        }

        parent.with_bbox(config.padding.apply(&bbox, false))
    }

    /// Expand the occupied area back out by padding, borders and margins
    fn reverse_insets(&self, bbox: &Rect) -> Rect {
        let bbox = self.config.padding.apply(bbox, true);
        let bbox = self.config.borders.apply(&bbox, true);
        self.config.margins.apply(&bbox, true)
    }

    /// Shift lines down inside a paragraph that was stretched to a fixed
    /// height
    fn apply_vertical_alignment(&self, lines: &mut [L], occupied: &Rect) {
        let Some(lowest) = lines
            .last()
            .and_then(|line| line.occupied_area())
            .map(|area| area.bbox.y1)
        else {
            return;
        };
        let inner = self.config.padding.apply(occupied, false);
        let slack = lowest - inner.y1;
        let dy = match self.config.vertical_alignment {
            VerticalAlignment::Top => return,
            VerticalAlignment::Middle => slack / 2.0,
            VerticalAlignment::Bottom => slack,
        };
        for line in lines.iter_mut() {
            line.move_by(Pt::ZERO, -dy);
        }
    }

    /// Rotate the occupied area about its lower-left corner, then pin the
    /// rotated bounding box to the original top-left corner
    fn rotation_layout(angle: f32, occupied: &Rect) -> (Transform, Rect) {
        let rotate = Transform::rotate_about(angle, occupied.x1, occupied.y1);
        let rotated = rotate.bounding_box(occupied);
        let dx = occupied.x1 - rotated.x1;
        let dy = occupied.y2 - rotated.y2;
        (rotate.with_translate(dx, dy), rotated.translate(dx, dy))
    }
}

fn line_bbox<L: LineRenderer>(line: &L) -> Rect {
    line.occupied_area().map(|area| area.bbox).unwrap_or_default()
}

impl<L: LineRenderer> Renderer for Paragraph<L> {
    fn layout(&mut self, area: &LayoutArea) -> LayoutResult<Paragraph<L>> {
        let config = Arc::clone(&self.config);
        let page = area.page;

        let prepared = self.prepare_area(area);
        let mut areas = if config.is_positioned() {
            vec![prepared.bbox]
        } else {
            self.area_provider.areas(&prepared)
        };
        if areas.is_empty() {
            debug!("area provider offered no regions, using the prepared area");
            areas.push(prepared.bbox);
        }

        let mut occupied = LayoutArea::new(
            page,
            Rect {
                x1: prepared.bbox.x1,
                y1: prepared.bbox.y2,
                x2: prepared.bbox.x2,
                y2: prepared.bbox.y2,
            },
        );

        let mut area_index = 0;
        let mut layout_box = prepared.with_bbox(areas[0]);
        let mut any_placed = false;
        let mut first_in_box = true;

        let mut lines: Vec<L> = Vec::new();
        let mut current = Some(L::new(&self.line_context, self.children.clone()));

        let mut last_y_line = layout_box.bbox.y2;
        let leading = config.leading;
        let mut leading_value = Pt::ZERO;
        let mut last_line_height = Pt::ZERO;
        let mut previous_descent = self.previous_descent;

        while let Some(mut line) = current.take() {
            line.set_tabs(&config.tabs);

            let indent = if any_placed {
                Pt::ZERO
            } else {
                config.first_line_indent
            };
            let available_width = layout_box.bbox.width() - indent;
            let slice = layout_box.with_bbox(Rect {
                x1: layout_box.bbox.x1 + indent,
                ..layout_box.bbox
            });
            // an area change retries this content whole, not the pieces cut for this slice
            let input = line.children().to_vec();
            let mut result = line.layout(&slice);
            let status = result.status;

            let (mut processed, overflow) = match status {
                LayoutStatus::Full => (Some(line), None),
                LayoutStatus::Partial => (result.split.take(), result.overflow.take()),
                LayoutStatus::Nothing => (None, Some(result.overflow.take().unwrap_or(line))),
            };

            if let Some(processed) = processed.as_mut() {
                let alignment = config.text_alignment;
                let justify = (status == LayoutStatus::Partial
                    && alignment == TextAlignment::Justified
                    && !result.split_forced_by_newline)
                    || alignment == TextAlignment::JustifiedAll;
                if justify {
                    processed.justify(available_width);
                } else {
                    let dx = available_width - line_bbox(processed).width();
                    match alignment {
                        TextAlignment::Right => processed.move_by(dx, Pt::ZERO),
                        TextAlignment::Center => processed.move_by(dx / 2.0, Pt::ZERO),
                        _ => {}
                    }
                }
            }

            leading_value = match (processed.as_ref(), leading.as_ref()) {
                (Some(processed), Some(leading)) => processed.leading_value(leading),
                _ => Pt::ZERO,
            };
            if processed.as_ref().is_some_and(|processed| processed.contains_image()) {
                leading_value -= previous_descent;
            }

            let mut does_not_fit = status == LayoutStatus::Nothing;
            let mut dy = Pt::ZERO;
            if let Some(processed) = processed.as_ref().filter(|_| !does_not_fit) {
                let bbox = line_bbox(processed);
                last_line_height = bbox.height();
                dy = if first_in_box {
                    -(leading_value - last_line_height) / 2.0
                } else {
                    last_y_line - leading_value - processed.baseline()
                };
                // leading can push a line that fit on its own past the bottom
                does_not_fit = leading.is_some() && layout_box.is_below_bottom(bbox.y1 + dy);
            }

            let mut line = match processed {
                Some(line) if !does_not_fit => line,
                _ => {
                    if area_index + 1 < areas.len() {
                        area_index += 1;
                        debug!("line does not fit, moving to region {area_index}");
                        layout_box = prepared.with_bbox(areas[area_index]);
                        last_y_line = layout_box.bbox.y2;
                        first_in_box = true;
                        current = Some(L::new(&self.line_context, input));
                        continue;
                    }

                    if config.keep_together {
                        debug!("paragraph must be kept together, placing nothing");
                        return LayoutResult::nothing(occupied, None);
                    }

                    occupied.bbox = self.reverse_insets(&occupied.bbox);
                    if !any_placed {
                        trace!("no line fits on page {page}");
                        return LayoutResult::nothing(occupied, None);
                    }

                    debug!(
                        "splitting paragraph after {} lines on page {page}",
                        lines.len()
                    );
                    let (retained, continuation) = self.split(occupied, lines, input);
                    return LayoutResult::partial(occupied, retained, continuation);
                }
            };

            if leading.is_some() {
                line.move_by(Pt::ZERO, dy);
                last_y_line = line.baseline();
            }
            let bbox = line_bbox(&line);
            occupied.bbox = occupied.bbox.union(&bbox);
            layout_box.bbox.y2 = bbox.y1;
            previous_descent = line.max_descent();
            trace!("placed line {} at {:?}", lines.len(), bbox);
            lines.push(line);

            any_placed = true;
            first_in_box = false;
            current = overflow;
        }

        // the half leading reserved above the first line is given back below the last one
        if leading.is_some() && !config.is_positioned() {
            let half_leading = (leading_value - last_line_height) / 2.0;
            let move_down = match layout_box.height_below(occupied.bbox.y1) {
                Some(slack) => half_leading.min(slack),
                None => half_leading,
            };
            occupied.bbox.y1 -= move_down.max(Pt::ZERO);
        }

        occupied.bbox = config.padding.apply(&occupied.bbox, true);
        if let Some(height) = config.height {
            if height > occupied.bbox.height() {
                occupied.bbox.y1 = occupied.bbox.y2 - height;
                self.apply_vertical_alignment(&mut lines, &occupied.bbox);
            }
        }

        if let Some(position) = config.position {
            let relative_y = if config.fixed_layout {
                Pt::ZERO
            } else {
                layout_box.bbox.y1
            };
            let dy = relative_y + position.y - occupied.bbox.y1;
            occupied.bbox = occupied.bbox.translate(Pt::ZERO, dy);
            for line in lines.iter_mut() {
                line.move_by(Pt::ZERO, dy);
            }
        }

        occupied.bbox = config.borders.apply(&occupied.bbox, true);
        occupied.bbox = config.margins.apply(&occupied.bbox, true);

        let mut rotation = None;
        if let Some(angle) = config.rotation {
            let (transform, rotated) = Self::rotation_layout(angle, &occupied.bbox);
            occupied.bbox = rotated;
            rotation = Some(transform);
            if area.is_below_bottom(rotated.y1) && !area.empty {
                debug!("rotated paragraph does not fit the height of a non-empty area");
                return LayoutResult::nothing(occupied, None);
            }
        }

        self.lines = lines;
        self.occupied = Some(occupied);
        self.previous_descent = previous_descent;
        self.rotation = rotation;
        LayoutResult::full(occupied)
    }

    fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.bbox = occupied.bbox.translate(dx, dy);
        }
        for line in self.lines.iter_mut() {
            line.move_by(dx, dy);
        }
        if let Some(rotation) = self.rotation {
            self.rotation = Some(
                Transform::translate(-dx, -dy)
                    .then(rotation)
                    .with_translate(dx, dy),
            );
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        match self.rotation {
            Some(rotation) => canvas.with_transform(rotation, |canvas| {
                for line in self.lines.iter() {
                    line.draw(canvas);
                }
            }),
            None => {
                for line in self.lines.iter() {
                    line.draw(canvas);
                }
            }
        }
    }

    fn first_baseline(&self) -> Option<Pt> {
        self.lines.first().and_then(|line| line.first_baseline())
    }

    fn occupied_area(&self) -> Option<&LayoutArea> {
        self.occupied.as_ref()
    }
}

impl<L> fmt::Display for Paragraph<L>
where
    L: LineRenderer + fmt::Display,
    L::Child: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            for child in self.children.iter() {
                write!(f, "{child}")?;
            }
        } else {
            for line in self.lines.iter() {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
