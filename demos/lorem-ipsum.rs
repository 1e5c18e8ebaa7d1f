use pdf_flow::layout::{paginate, Inline, LayoutArea, Leading, Line, Paragraph, ParagraphConfig, Renderer, TextAlignment};
use pdf_flow::pdf_writer::{Name, Pdf, Ref};
use pdf_flow::{Canvas, In, Metrics, MonoMetrics, Pt, Rect, SpanFont};
use std::sync::Arc;

fn main() {
    // Courier is a standard PDF font, so it needs no embedding and its
    // metrics are those of a monospaced face
    let metrics: Arc<dyn Metrics> = Arc::new(MonoMetrics {
        advance: 0.6,
        ascent: 0.629,
        descent: -0.157,
    });
    let font = SpanFont {
        id: 0,
        size: Pt(10.0),
    };

    let mut config = ParagraphConfig::new();
    config
        .text_alignment(TextAlignment::Justified)
        .leading(Leading::Multiplied(1.35))
        .first_line_indent(In(0.25));

    let paragraph: Paragraph<Line> = Paragraph::new(
        config,
        metrics,
        vec![Inline::text(lipsum::lipsum(800), font)],
    )
    .expect("valid configuration");

    let (width, height) = (Pt::from(In(5.5)), Pt::from(In(8.5)));
    let margin = Pt::from(In(0.5));
    let fragments = paginate(paragraph, |page| {
        LayoutArea::new(
            page,
            Rect {
                x1: margin,
                y1: margin,
                x2: width - margin,
                y2: height - margin,
            },
        )
    })
    .expect("text fits on an empty page");

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let page_ids: Vec<Ref> = (0..fragments.len())
        .map(|i| Ref::new(4 + 2 * i as i32))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(font_id).base_font(Name(b"Courier"));

    for (fragment, page_id) in fragments.iter().zip(page_ids.iter().copied()) {
        let mut canvas = Canvas::new();
        fragment.draw(&mut canvas);
        let content_id = Ref::new(page_id.get() + 1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::from_xywh(Pt(0.0), Pt(0.0), width, height).into());
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(Name(b"F0"), font_id);
        drop(page);

        pdf.stream(content_id, &canvas.render());
    }

    std::fs::write("lorem-ipsum.pdf", pdf.finish()).expect("can write pdf");
}
