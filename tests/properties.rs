use pdf_flow::layout::*;
use pdf_flow::*;
use proptest::prelude::*;
use std::sync::Arc;

const FONT: SpanFont = SpanFont {
    id: 0,
    size: Pt(10.0),
};

fn paragraph(text: &str, alignment: TextAlignment, leading: Option<f32>) -> Paragraph<Line> {
    let metrics: Arc<dyn Metrics> = Arc::new(MonoMetrics::default());
    let mut config = ParagraphConfig::new();
    config.text_alignment(alignment);
    if let Some(factor) = leading {
        config.leading(Leading::Multiplied(factor));
    }
    Paragraph::new(config, metrics, vec![Inline::text(text, FONT)]).expect("valid config")
}

fn text_of(children: &[Inline]) -> String {
    children.iter().map(|child| child.to_string()).collect()
}

fn bbox(line: &Line) -> Rect {
    line.occupied_area().expect("line is laid out").bbox
}

fn alignments() -> impl Strategy<Value = TextAlignment> {
    prop_oneof![
        Just(TextAlignment::Left),
        Just(TextAlignment::Center),
        Just(TextAlignment::Right),
        Just(TextAlignment::Justified),
        Just(TextAlignment::JustifiedAll),
    ]
}

fn words(count: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", count).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn pages_contain_their_lines_and_stack_downwards(
        text in words(1..40),
        width in 20.0f32..200.0,
        height in 40.0f32..300.0,
        alignment in alignments(),
        leading in prop::option::of(1.0f32..2.0),
    ) {
        let fragments = paginate(paragraph(&text, alignment, leading), |page| {
            LayoutArea::new(page, Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(width), Pt(height)))
        })
        .expect("a single character always fits");

        for (page, fragment) in fragments.iter().enumerate() {
            let occupied = fragment.occupied_area().expect("placed");
            prop_assert_eq!(occupied.page, page);
            prop_assert!(!fragment.lines().is_empty());

            let mut previous_bottom: Option<Pt> = None;
            for line in fragment.lines() {
                let line = bbox(line);
                prop_assert!(occupied.bbox.contains(&line));
                if let Some(bottom) = previous_bottom {
                    prop_assert!(line.y2.0 <= bottom.0 + 1e-3);
                }
                previous_bottom = Some(line.y1);
            }
        }

        let rejoined: String = fragments
            .iter()
            .map(|fragment| text_of(fragment.children()))
            .collect();
        prop_assert_eq!(rejoined, text);
    }

    #[test]
    fn split_and_overflow_rejoin_to_the_input(
        text in words(1..40),
        width in 20.0f32..200.0,
        height in 10.0f32..120.0,
        leading in prop::option::of(1.0f32..2.0),
    ) {
        let mut p = paragraph(&text, TextAlignment::Left, leading);
        let result = p.layout(&LayoutArea::new(
            0,
            Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(width), Pt(height)),
        ));

        match result.status {
            LayoutStatus::Full => prop_assert_eq!(text_of(p.children()), text),
            LayoutStatus::Partial => {
                let split = result.split.expect("split fragment");
                let overflow = result.overflow.expect("overflow fragment");
                let rejoined = text_of(split.children()) + &text_of(overflow.children());
                prop_assert_eq!(rejoined, text);
                for line in split.lines() {
                    prop_assert!(result.occupied_area.bbox.contains(&bbox(line)));
                }
            }
            LayoutStatus::Nothing => {
                prop_assert!(result.split.is_none() && result.overflow.is_none());
                prop_assert_eq!(text_of(p.children()), text);
            }
        }
    }

    #[test]
    fn moving_there_and_back_restores_positions(
        text in words(1..15),
        width in 40.0f32..200.0,
        alignment in alignments(),
        dx in -500.0f32..500.0,
        dy in -500.0f32..500.0,
    ) {
        let mut p = paragraph(&text, alignment, Some(1.2));
        let result = p.layout(&LayoutArea::new(
            0,
            Rect::from_xywh(Pt(0.0), Pt(0.0), Pt(width), Pt(1_000.0)),
        ));
        prop_assert_eq!(result.status, LayoutStatus::Full);

        let occupied = p.occupied_area().expect("placed").bbox;
        let lines: Vec<Rect> = p.lines().iter().map(bbox).collect();
        let baseline = p.first_baseline().expect("placed");

        p.move_by(Pt(dx), Pt(dy));
        let moved = p.occupied_area().expect("placed").bbox;
        prop_assert!(moved.approx_eq(&occupied.translate(Pt(dx), Pt(dy))));

        p.move_by(Pt(-dx), Pt(-dy));
        prop_assert!(p.occupied_area().expect("placed").bbox.approx_eq(&occupied));
        for (line, before) in p.lines().iter().zip(lines.iter()) {
            prop_assert!(bbox(line).approx_eq(before));
        }
        prop_assert!(p.first_baseline().expect("placed").approx_eq(baseline));
    }
}
