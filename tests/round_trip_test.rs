//! Round-trip tests through the public conversion API.
//!
//! Converting HTML to a model and back must be a fixed point at the model
//! level: re-parsing the emitted markup yields a deep-equal model, whatever
//! cosmetic differences (attribute order, normalized colors, explicit start
//! attributes) the emitted HTML carries.

use proptest::prelude::*;
use velum::format::{CssLength, Direction, TextAlign};
use velum::model::{Block, Paragraph, Segment};
use velum::{
    ContentModelDocument, DomToModelOptions, Format, ModelToDomOptions, create_model_from_html,
    model_to_html,
};

fn parse(html: &str) -> ContentModelDocument {
    create_model_from_html(html, &DomToModelOptions::default())
}

fn write(model: &ContentModelDocument) -> String {
    model_to_html(model, &ModelToDomOptions::default()).expect("model should be writable")
}

fn assert_stable(html: &str) {
    let first = parse(html);
    let emitted = write(&first);
    let second = parse(&emitted);
    assert_eq!(
        first, second,
        "model drifted across a round trip of {html:?} (emitted {emitted:?})"
    );
}

// ============================================================================
// Idempotence under a no-op edit
// ============================================================================

#[test]
fn test_round_trip_inline_content() {
    assert_stable("hello <b>world</b>");
    assert_stable("<i>a</i><u>b</u><s>c</s>");
    assert_stable("x<sup>2</sup> and y<sub>0</sub>");
    assert_stable("<span style=\"color: red\">red</span> plain");
    assert_stable("a<br>b");
}

#[test]
fn test_round_trip_blocks() {
    assert_stable("<p>para</p>");
    assert_stable("<h1>Title</h1><h2>sub</h2>");
    assert_stable("<div style=\"text-align: center\">c</div>");
    assert_stable("<blockquote><p>q</p></blockquote>");
    assert_stable("<hr>");
    assert_stable("<pre>a  b</pre>");
}

#[test]
fn test_round_trip_lists() {
    assert_stable("<ol><li>a</li><li>b</li></ol>");
    assert_stable("<ul><li>one<ul><li>two</li></ul></li></ul>");
    assert_stable("<ol start=\"5\"><li>a</li></ol>");
    assert_stable("<ol><li>a</li><li>b</li></ol><p>x</p><ol><li>c</li></ol>");
}

#[test]
fn test_round_trip_tables() {
    assert_stable("<table><tr><th>h1</th><th>h2</th></tr><tr><td>a</td><td>b</td></tr></table>");
    assert_stable(
        "<table><tr><td rowspan=\"2\">a</td><td>b</td></tr><tr><td>c</td></tr></table>",
    );
    assert_stable("<table><tr><td style=\"color: red\">a</td></tr></table>");
}

#[test]
fn test_round_trip_images() {
    assert_stable("<img src=\"a.png\" alt=\"b\">");
    assert_stable("<img src=\"a.png\" style=\"width: 120px; height: 80px\">");
}

// ============================================================================
// Alignment round trip, all (align, direction) pairs
// ============================================================================

#[test]
fn test_alignment_round_trip_all_pairs() {
    for align in [TextAlign::Start, TextAlign::Center, TextAlign::End] {
        for direction in [Direction::Ltr, Direction::Rtl] {
            let mut model = ContentModelDocument::new();
            let mut paragraph = Paragraph::new();
            paragraph.format.text_align = Some(align);
            paragraph.format.direction = Some(direction);
            paragraph.segments.push(Segment::text("x", Format::default()));
            model.blocks.push(Block::Paragraph(paragraph));

            let emitted = write(&model);
            let reread = parse(&emitted);
            let Block::Paragraph(p) = &reread.blocks[0] else {
                panic!("expected paragraph in {emitted:?}");
            };
            assert_eq!(
                p.format.text_align,
                Some(align),
                "alignment lost for {align:?}/{direction:?} via {emitted:?}"
            );
            assert_eq!(p.format.direction, Some(direction));
        }
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn prop_plain_text_round_trips(text in "[a-z][a-z ]{0,30}") {
        let html = format!("<div>{text}</div>");
        let first = parse(&html);
        let second = parse(&write(&first));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_pixel_margins_round_trip(
        top in 0u32..200,
        right in 0u32..200,
        bottom in 0u32..200,
        left in 0u32..200,
    ) {
        let mut model = ContentModelDocument::new();
        let mut paragraph = Paragraph::new();
        paragraph.format.margin.top = Some(CssLength::Px(top as f32));
        paragraph.format.margin.right = Some(CssLength::Px(right as f32));
        paragraph.format.margin.bottom = Some(CssLength::Px(bottom as f32));
        paragraph.format.margin.left = Some(CssLength::Px(left as f32));
        let expected = paragraph.format.margin.clone();
        paragraph.segments.push(Segment::text("x", Format::default()));
        model.blocks.push(Block::Paragraph(paragraph));

        let reread = parse(&write(&model));
        let Block::Paragraph(p) = &reread.blocks[0] else {
            panic!("expected paragraph");
        };
        prop_assert_eq!(&p.format.margin, &expected);
    }
}
