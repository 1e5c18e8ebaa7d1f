//! The draw target for laid-out fragments.
//!
//! Drawing records positioned items in order; [`Canvas::render`] turns them
//! into a PDF content stream that can be attached to a page by whatever
//! owns the document.

use crate::colour::Colour;
use crate::metrics::SpanFont;
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use pdf_writer::{Content, Name, Str};

/// A run of text drawn with its baseline origin at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image XObject (rendered as `/I{image_id}`) scaled into `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: usize,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum CanvasItem {
    Text(SpanLayout),
    Image(ImageLayout),
    /// Items drawn under an extra transformation, e.g. a rotated paragraph
    Group {
        transform: Transform,
        items: Vec<CanvasItem>,
    },
}

/// An ordered list of drawn items
#[derive(Clone, Default, Debug)]
pub struct Canvas {
    pub items: Vec<CanvasItem>,
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas::default()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.items.push(CanvasItem::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.items.push(CanvasItem::Image(image));
    }

    /// Draw into a nested canvas, then record everything it collected as a
    /// single group under `transform`
    pub fn with_transform<F: FnOnce(&mut Canvas)>(&mut self, transform: Transform, draw: F) {
        let mut inner = Canvas::new();
        draw(&mut inner);
        self.items.push(CanvasItem::Group {
            transform,
            items: inner.items,
        });
    }

    /// All text spans in drawing order, descending into groups
    pub fn spans(&self) -> Vec<&SpanLayout> {
        fn collect<'a>(items: &'a [CanvasItem], out: &mut Vec<&'a SpanLayout>) {
            for item in items {
                match item {
                    CanvasItem::Text(span) => out.push(span),
                    CanvasItem::Image(_) => {}
                    CanvasItem::Group { items, .. } => collect(items, out),
                }
            }
        }

        let mut spans = Vec::new();
        collect(&self.items, &mut spans);
        spans
    }

    /// Serialise the canvas into PDF content stream operators
    pub fn render(&self) -> Vec<u8> {
        let mut content = Content::new();
        render_items(&mut content, &self.items);
        content.finish()
    }
}

fn render_items(content: &mut Content, items: &[CanvasItem]) {
    for item in items {
        match item {
            CanvasItem::Text(span) => {
                let font_name = format!("F{}", span.font.id);
                content.save_state();
                span.colour.write_fill(content);
                content.begin_text();
                content.set_font(Name(font_name.as_bytes()), *span.font.size);
                content.next_line(*span.coords.0, *span.coords.1);
                content.show(Str(span.text.as_bytes()));
                content.end_text();
                content.restore_state();
            }
            CanvasItem::Image(image) => {
                let image_name = format!("I{}", image.image_id);
                content.save_state();
                Transform {
                    a: *image.position.width(),
                    b: 0.0,
                    c: 0.0,
                    d: *image.position.height(),
                    e: *image.position.x1,
                    f: *image.position.y1,
                }
                .write_to_content(content);
                content.x_object(Name(image_name.as_bytes()));
                content.restore_state();
            }
            CanvasItem::Group { transform, items } => {
                content.save_state();
                transform.write_to_content(content);
                render_items(content, items);
                content.restore_state();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    fn span(text: &str) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: SpanFont { id: 2, size: Pt(12.0) },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(700.0)),
        }
    }

    #[test]
    fn renders_text_operators() {
        let mut canvas = Canvas::new();
        canvas.add_span(span("Hello"));
        let rendered = String::from_utf8_lossy(&canvas.render()).to_string();
        assert!(rendered.contains("/F2 12 Tf"));
        assert!(rendered.contains("72 700 Td"));
        assert!(rendered.contains("(Hello) Tj"));
    }

    #[test]
    fn groups_wrap_their_items() {
        let mut canvas = Canvas::new();
        canvas.with_transform(Transform::translate(Pt(5.0), Pt(6.0)), |inner| {
            inner.add_span(span("inner"));
            inner.add_image(ImageLayout {
                image_id: 0,
                position: Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
            });
        });
        assert_eq!(canvas.items.len(), 1);
        assert_eq!(canvas.spans().len(), 1);
        let rendered = String::from_utf8_lossy(&canvas.render()).to_string();
        assert!(rendered.contains("1 0 0 1 5 6 cm"));
        assert!(rendered.contains("/I0 Do"));
    }
}
