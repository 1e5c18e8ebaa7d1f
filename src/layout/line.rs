//! The default line engine: greedy word fitting over [`Inline`] children.

use super::area::LayoutArea;
use super::config::{Leading, TabSettings};
use super::inline::{Inline, InlineImage, TextRun};
use super::renderer::{LineRenderer, Renderer};
use super::result::LayoutResult;
use crate::canvas::{Canvas, ImageLayout, SpanLayout};
use crate::colour::Colour;
use crate::metrics::{Metrics, SpanFont};
use crate::rect::Rect;
use crate::units::{Pt, EPSILON};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Glyphs {
    Word {
        text: String,
        font: SpanFont,
        colour: Colour,
    },
    Image(InlineImage),
}

/// A word or image at its final horizontal position
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    glyphs: Glyphs,
    x: Pt,
    width: Pt,
    /// whether the gap in front of this item may be widened by justification
    stretch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
    Newline,
}

/// Split text into words, whitespace runs and newlines, each with the byte
/// offset it starts at
fn tokenize(text: &str) -> Vec<(usize, Token<'_>)> {
    fn token(text: &str, whitespace: bool) -> Token<'_> {
        if whitespace {
            Token::Space(text)
        } else {
            Token::Word(text)
        }
    }

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        if ch == '\n' {
            if let Some(whitespace) = current.take() {
                tokens.push((start, token(&text[start..i], whitespace)));
            }
            tokens.push((i, Token::Newline));
            continue;
        }
        let whitespace = ch.is_whitespace();
        match current {
            Some(previous) if previous == whitespace => {}
            Some(previous) => {
                tokens.push((start, token(&text[start..i], previous)));
                start = i;
                current = Some(whitespace);
            }
            None => {
                start = i;
                current = Some(whitespace);
            }
        }
    }
    if let Some(whitespace) = current {
        tokens.push((start, token(&text[start..], whitespace)));
    }
    tokens
}

/// Where the children of a line are cut between the laid-out part and the
/// overflow
#[derive(Debug, Clone, Copy)]
enum Cut {
    /// child `index` starts the overflow
    Before(usize),
    /// child `index` is the last one on the line
    After(usize),
    /// text child `index` is split at a byte offset
    Text(usize, usize),
}

/// One line of inline content.
///
/// ```
/// use std::sync::Arc;
/// use pdf_flow::layout::{Inline, LayoutArea, LayoutStatus, Line, Renderer};
/// use pdf_flow::{Metrics, MonoMetrics, Pt, Rect, SpanFont};
///
/// let metrics: Arc<dyn Metrics> = Arc::new(MonoMetrics::default());
/// let font = SpanFont { id: 0, size: Pt(10.0) };
/// let mut line = Line::new(metrics, vec![Inline::text("aaaa bbbb cccc", font)]);
///
/// // room for two four-character words
/// let area = LayoutArea::new(0, Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(45.0), Pt(100.0)));
/// let result = line.layout(&area);
/// assert_eq!(result.status, LayoutStatus::Partial);
/// assert_eq!(result.split.unwrap().to_string(), "aaaa bbbb ");
/// assert_eq!(result.overflow.unwrap().to_string(), "cccc");
/// ```
pub struct Line {
    metrics: Arc<dyn Metrics>,
    tabs: TabSettings,
    children: Vec<Inline>,
    placed: Vec<Placed>,
    occupied: Option<LayoutArea>,
    baseline: Pt,
    max_ascent: Pt,
    max_descent: Pt,
}

impl Line {
    pub fn new(metrics: Arc<dyn Metrics>, children: Vec<Inline>) -> Line {
        Line {
            metrics,
            tabs: TabSettings::default(),
            children,
            placed: Vec::new(),
            occupied: None,
            baseline: Pt::ZERO,
            max_ascent: Pt::ZERO,
            max_descent: Pt::ZERO,
        }
    }

    fn sibling(&self, children: Vec<Inline>) -> Line {
        let mut line = Line::new(Arc::clone(&self.metrics), children);
        line.tabs = self.tabs.clone();
        line
    }

    /// Number of characters of `word` that fit in `width`
    fn fitting_prefix(&self, word: &str, font: SpanFont, width: Pt) -> usize {
        let mut used = Pt::ZERO;
        let mut end = 0;
        for (i, ch) in word.char_indices() {
            let next = i + ch.len_utf8();
            used += self.metrics.text_width(&word[i..next], font);
            if used.0 > width.0 + EPSILON {
                break;
            }
            end = next;
        }
        end
    }

    fn cut_children(&self, cut: Cut) -> (Vec<Inline>, Vec<Inline>) {
        let (split_at, text_split) = match cut {
            Cut::Before(index) => (index, None),
            Cut::After(index) => (index + 1, None),
            Cut::Text(index, offset) => (index, Some(offset)),
        };
        let mut fitted: Vec<Inline> = self.children[..split_at].to_vec();
        let mut rest: Vec<Inline> = Vec::new();
        if let Some(offset) = text_split {
            if let Some(Inline::Text(run)) = self.children.get(split_at) {
                let (head, tail) = run.text.split_at(offset);
                if !head.is_empty() {
                    fitted.push(Inline::Text(TextRun {
                        text: head.to_string(),
                        ..run.clone()
                    }));
                }
                if !tail.is_empty() {
                    rest.push(Inline::Text(TextRun {
                        text: tail.to_string(),
                        ..run.clone()
                    }));
                }
            }
            rest.extend(self.children.iter().skip(split_at + 1).cloned());
        } else {
            rest.extend(self.children.iter().skip(split_at).cloned());
        }
        (fitted, rest)
    }
}

impl Renderer for Line {
    fn layout(&mut self, area: &LayoutArea) -> LayoutResult<Line> {
        let left = area.bbox.x1;
        let right = area.bbox.x2;
        let top = area.bbox.y2;

        let mut x = left;
        let mut gap = Pt::ZERO;
        let mut placed: Vec<Placed> = Vec::new();
        let mut ascent = Pt::ZERO;
        let mut descent = Pt::ZERO;
        let mut cut: Option<Cut> = None;
        let mut forced_by_newline = false;
        let mut first_font: Option<SpanFont> = None;

        'children: for (index, child) in self.children.iter().enumerate() {
            match child {
                Inline::Text(run) => {
                    // a run only sizes the line once some of it lands there
                    let run_ascent = self.metrics.ascent(run.font);
                    let run_descent = self.metrics.descent(run.font);
                    first_font.get_or_insert(run.font);

                    for (offset, token) in tokenize(&run.text) {
                        match token {
                            Token::Newline => {
                                ascent = ascent.max(run_ascent);
                                descent = descent.min(run_descent);
                                cut = Some(Cut::Text(index, offset + 1));
                                forced_by_newline = true;
                                break 'children;
                            }
                            Token::Space(space) => {
                                gap += self.metrics.text_width(space, run.font);
                            }
                            Token::Word(word) => {
                                let width = self.metrics.text_width(word, run.font);
                                let start = x + gap;
                                if (start + width).0 <= right.0 + EPSILON {
                                    placed.push(Placed {
                                        glyphs: Glyphs::Word {
                                            text: word.to_string(),
                                            font: run.font,
                                            colour: run.colour,
                                        },
                                        x: start,
                                        width,
                                        stretch: gap > Pt::ZERO && !placed.is_empty(),
                                    });
                                    x = start + width;
                                    gap = Pt::ZERO;
                                    ascent = ascent.max(run_ascent);
                                    descent = descent.min(run_descent);
                                } else if placed.is_empty() {
                                    // a single word wider than the line: break it between characters
                                    let end = self.fitting_prefix(word, run.font, right - start);
                                    if end == 0 {
                                        return LayoutResult::nothing(
                                            *area,
                                            Some(self.sibling(self.children.clone())),
                                        );
                                    }
                                    let width = self.metrics.text_width(&word[..end], run.font);
                                    placed.push(Placed {
                                        glyphs: Glyphs::Word {
                                            text: word[..end].to_string(),
                                            font: run.font,
                                            colour: run.colour,
                                        },
                                        x: start,
                                        width,
                                        stretch: false,
                                    });
                                    x = start + width;
                                    ascent = ascent.max(run_ascent);
                                    descent = descent.min(run_descent);
                                    cut = Some(Cut::Text(index, offset + end));
                                    break 'children;
                                } else {
                                    cut = Some(Cut::Text(index, offset));
                                    break 'children;
                                }
                            }
                        }
                    }
                }
                Inline::Image(image) => {
                    let start = x + gap;
                    if (start + image.width).0 <= right.0 + EPSILON {
                        placed.push(Placed {
                            glyphs: Glyphs::Image(*image),
                            x: start,
                            width: image.width,
                            stretch: gap > Pt::ZERO && !placed.is_empty(),
                        });
                        ascent = ascent.max(image.height);
                        x = start + image.width;
                        gap = Pt::ZERO;
                    } else if placed.is_empty() {
                        return LayoutResult::nothing(
                            *area,
                            Some(self.sibling(self.children.clone())),
                        );
                    } else {
                        cut = Some(Cut::Before(index));
                        break 'children;
                    }
                }
                Inline::Space(width) => {
                    x = (x + gap + *width).min(right).max(x);
                    gap = Pt::ZERO;
                }
                Inline::Tab => {
                    x = (left + self.tabs.next_stop(x + gap - left)).min(right).max(x);
                    gap = Pt::ZERO;
                }
                Inline::LineBreak => {
                    cut = Some(Cut::After(index));
                    forced_by_newline = true;
                    break 'children;
                }
            }
        }

        // whitespace-only lines keep the height of their first run
        if placed.is_empty() && ascent == Pt::ZERO && descent == Pt::ZERO {
            if let Some(font) = first_font {
                ascent = self.metrics.ascent(font);
                descent = self.metrics.descent(font);
            }
        }

        let height = ascent - descent;
        if let Some(available) = area.height_below(top) {
            if height.0 > available.0 + EPSILON {
                return LayoutResult::nothing(*area, Some(self.sibling(self.children.clone())));
            }
        }

        let baseline = top - ascent;
        let occupied = area.with_bbox(Rect {
            x1: left,
            y1: baseline + descent,
            x2: x.max(left),
            y2: top,
        });

        let (fitted, rest) = match cut {
            Some(cut) => self.cut_children(cut),
            None => (self.children.clone(), Vec::new()),
        };

        if rest.is_empty() {
            self.children = fitted;
            self.placed = placed;
            self.occupied = Some(occupied);
            self.baseline = baseline;
            self.max_ascent = ascent;
            self.max_descent = descent;
            return LayoutResult::full(occupied);
        }

        let mut split = self.sibling(fitted);
        split.placed = placed;
        split.occupied = Some(occupied);
        split.baseline = baseline;
        split.max_ascent = ascent;
        split.max_descent = descent;
        let overflow = self.sibling(rest);
        LayoutResult::partial(occupied, split, overflow).forced_by_newline(forced_by_newline)
    }

    fn move_by(&mut self, dx: Pt, dy: Pt) {
        if let Some(occupied) = self.occupied.as_mut() {
            occupied.bbox = occupied.bbox.translate(dx, dy);
        }
        self.baseline += dy;
        for item in self.placed.iter_mut() {
            item.x += dx;
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        for item in self.placed.iter() {
            match &item.glyphs {
                Glyphs::Word { text, font, colour } => canvas.add_span(SpanLayout {
                    text: text.clone(),
                    font: *font,
                    colour: *colour,
                    coords: (item.x, self.baseline),
                }),
                Glyphs::Image(image) => canvas.add_image(ImageLayout {
                    image_id: image.image_id,
                    position: Rect::from_xywh(item.x, self.baseline, image.width, image.height),
                }),
            }
        }
    }

    fn first_baseline(&self) -> Option<Pt> {
        self.occupied.map(|_| self.baseline)
    }

    fn occupied_area(&self) -> Option<&LayoutArea> {
        self.occupied.as_ref()
    }
}

impl LineRenderer for Line {
    type Child = Inline;
    type Context = Arc<dyn Metrics>;

    fn new(context: &Self::Context, children: Vec<Inline>) -> Line {
        Line::new(Arc::clone(context), children)
    }

    fn children(&self) -> &[Inline] {
        &self.children
    }

    fn into_children(self) -> Vec<Inline> {
        self.children
    }

    fn set_tabs(&mut self, tabs: &TabSettings) {
        self.tabs = tabs.clone();
    }

    fn justify(&mut self, width: Pt) {
        let Some(occupied) = self.occupied.as_mut() else {
            return;
        };
        let target = occupied.bbox.x1 + width;
        let content_right = self
            .placed
            .last()
            .map(|item| item.x + item.width)
            .unwrap_or(occupied.bbox.x1);
        let extra = target - content_right;
        let gaps = self.placed.iter().filter(|item| item.stretch).count();
        if gaps == 0 || extra.0 <= EPSILON {
            return;
        }

        let per_gap = extra / gaps as f32;
        let mut shift = Pt::ZERO;
        for item in self.placed.iter_mut() {
            if item.stretch {
                shift += per_gap;
            }
            item.x += shift;
        }
        occupied.bbox.x2 = target;
    }

    fn baseline(&self) -> Pt {
        self.baseline
    }

    fn max_descent(&self) -> Pt {
        self.max_descent
    }

    fn contains_image(&self) -> bool {
        self.placed
            .iter()
            .any(|item| matches!(item.glyphs, Glyphs::Image(_)))
    }

    fn leading_value(&self, leading: &Leading) -> Pt {
        match *leading {
            Leading::Fixed(value) => value,
            Leading::Multiplied(factor) => {
                let height = self
                    .occupied
                    .map(|occupied| occupied.bbox.height())
                    .unwrap_or(self.max_ascent - self.max_descent);
                height * factor
            }
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children.iter() {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStatus;
    use crate::metrics::MonoMetrics;

    const FONT: SpanFont = SpanFont {
        id: 0,
        size: Pt(10.0),
    };

    fn line(children: Vec<Inline>) -> Line {
        Line::new(Arc::new(MonoMetrics::default()), children)
    }

    fn area(width: f32, height: f32) -> LayoutArea {
        LayoutArea::new(0, Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(width), Pt(height)))
    }

    #[test]
    fn tokenizes_words_spaces_and_newlines() {
        assert_eq!(
            tokenize("ab  c\nd"),
            vec![
                (0, Token::Word("ab")),
                (2, Token::Space("  ")),
                (4, Token::Word("c")),
                (5, Token::Newline),
                (6, Token::Word("d")),
            ]
        );
    }

    #[test]
    fn full_line_sits_at_the_top_of_the_area() {
        let mut line = line(vec![Inline::text("ab cd", FONT)]);
        let result = line.layout(&area(100.0, 50.0));
        assert_eq!(result.status, LayoutStatus::Full);
        let bbox = line.occupied_area().unwrap().bbox;
        // five characters at 5pt each
        assert_eq!(bbox.width(), Pt(25.0));
        assert_eq!(bbox.y2, Pt(50.0));
        assert_eq!(bbox.height(), Pt(10.0));
        assert_eq!(line.baseline(), Pt(42.0));
        assert_eq!(line.max_descent(), Pt(-2.0));
    }

    #[test]
    fn explicit_newline_is_flagged() {
        let mut line = line(vec![Inline::text("ab\ncd", FONT)]);
        let result = line.layout(&area(100.0, 50.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(result.split_forced_by_newline);
        assert_eq!(result.split.unwrap().to_string(), "ab\n");
        assert_eq!(result.overflow.unwrap().to_string(), "cd");
    }

    #[test]
    fn long_word_breaks_between_characters() {
        let mut line = line(vec![Inline::text("abcdefgh", FONT)]);
        let result = line.layout(&area(20.0, 50.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(!result.split_forced_by_newline);
        assert_eq!(result.split.unwrap().to_string(), "abcd");
        assert_eq!(result.overflow.unwrap().to_string(), "efgh");
    }

    #[test]
    fn too_short_area_places_nothing() {
        let mut line = line(vec![Inline::text("ab", FONT)]);
        let result = line.layout(&area(100.0, 5.0));
        assert_eq!(result.status, LayoutStatus::Nothing);
        assert_eq!(result.overflow.unwrap().to_string(), "ab");
    }

    #[test]
    fn justify_stretches_gaps_to_the_target() {
        let mut line = line(vec![Inline::text("ab cd ef", FONT)]);
        line.layout(&area(100.0, 50.0));
        line.justify(Pt(60.0));
        assert_eq!(line.occupied_area().unwrap().bbox.width(), Pt(60.0));
        let mut canvas = Canvas::new();
        line.draw(&mut canvas);
        let spans = canvas.spans();
        assert_eq!(spans[2].coords.0 + Pt(10.0), Pt(60.0));

        // idempotent
        line.justify(Pt(60.0));
        let mut again = Canvas::new();
        line.draw(&mut again);
        assert_eq!(again.spans()[2].coords, spans[2].coords);
    }

    #[test]
    fn tabs_advance_to_the_next_stop() {
        let mut line = line(vec![
            Inline::text("ab", FONT),
            Inline::Tab,
            Inline::text("cd", FONT),
        ]);
        line.set_tabs(&TabSettings {
            default_interval: Pt(30.0),
            stops: Vec::new(),
        });
        line.layout(&area(100.0, 50.0));
        let mut canvas = Canvas::new();
        line.draw(&mut canvas);
        assert_eq!(canvas.spans()[1].coords.0, Pt(30.0));
    }

    #[test]
    fn images_raise_the_line_and_are_reported() {
        let mut line = line(vec![Inline::text("ab ", FONT), Inline::image(0, Pt(20.0), Pt(30.0))]);
        assert_eq!(line.layout(&area(100.0, 50.0)).status, LayoutStatus::Full);
        assert!(line.contains_image());
        assert_eq!(line.occupied_area().unwrap().bbox.height(), Pt(32.0));
        assert_eq!(line.leading_value(&Leading::Multiplied(1.5)), Pt(48.0));
    }

    #[test]
    fn overflowing_runs_do_not_size_the_line() {
        let big = SpanFont {
            id: 1,
            size: Pt(40.0),
        };
        let mut line = line(vec![
            Inline::text("aaaa ", FONT),
            Inline::text("bbbbbbbb", big),
        ]);
        let result = line.layout(&area(30.0, 20.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert_eq!(result.occupied_area.bbox.height(), Pt(10.0));
        assert_eq!(result.split.unwrap().to_string(), "aaaa ");
        assert_eq!(result.overflow.unwrap().to_string(), "bbbbbbbb");
    }

    #[test]
    fn whitespace_only_lines_keep_their_height() {
        let mut line = line(vec![Inline::text("   ", FONT)]);
        let result = line.layout(&area(30.0, 20.0));
        assert_eq!(result.status, LayoutStatus::Full);
        assert_eq!(result.occupied_area.bbox.height(), Pt(10.0));
    }

    #[test]
    fn fixed_spaces_stop_at_the_right_edge() {
        let mut line = line(vec![
            Inline::text("ab", FONT),
            Inline::Space(Pt(50.0)),
            Inline::text("cd", FONT),
        ]);
        let result = line.layout(&area(30.0, 20.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert_eq!(result.occupied_area.bbox.x2, Pt(30.0));
        assert_eq!(result.overflow.unwrap().to_string(), "cd");
    }
}
