//! Paragraph layout: fitting inline content into lines and stacking those
//! lines into the areas a page offers.
//!
//! A [`Paragraph`] drives a [`LineRenderer`] (by default [`Line`]) one line
//! at a time, applies alignment and leading, and reports a
//! [`LayoutResult`]:
//!
//! - `Full`: the paragraph is placed and ready to [`draw`](Renderer::draw)
//! - `Partial`: the areas ran out; `split` holds the placed lines and
//!   `overflow` a continuation to lay out in a later area
//! - `Nothing`: not even one line fits (or the paragraph must be kept
//!   together); retry the same fragment elsewhere
//!
//! [`paginate`] runs that loop for you over a sequence of areas.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pdf_flow::layout::{paginate, Inline, LayoutArea, Leading, Line, Paragraph, ParagraphConfig, Renderer};
//! use pdf_flow::{Canvas, Metrics, MonoMetrics, Pt, Rect, SpanFont};
//!
//! let metrics: Arc<dyn Metrics> = Arc::new(MonoMetrics::default());
//! let font = SpanFont { id: 0, size: Pt(10.0) };
//! let mut config = ParagraphConfig::new();
//! config.leading(Leading::Multiplied(1.2));
//!
//! let words = "lorem ipsum dolor sit amet ".repeat(20);
//! let paragraph: Paragraph<Line> =
//!     Paragraph::new(config, metrics, vec![Inline::text(words, font)]).expect("valid config");
//!
//! // a small page: 100pt wide, room for a handful of lines
//! let fragments = paginate(paragraph, |page| {
//!     LayoutArea::new(page, Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(100.0), Pt(60.0)))
//! })
//! .expect("every line fits on an empty page");
//! assert!(fragments.len() > 1);
//!
//! let mut canvas = Canvas::new();
//! fragments[0].draw(&mut canvas);
//! assert!(!canvas.render().is_empty());
//! ```

mod area;
mod config;
mod flow;
mod inline;
mod line;
mod margins;
mod paragraph;
mod renderer;
mod result;

pub use area::*;
pub use config::*;
pub use flow::*;
pub use inline::*;
pub use line::*;
pub use margins::*;
pub use paragraph::*;
pub use renderer::*;
pub use result::*;
