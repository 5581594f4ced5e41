//! Format emission behavior observed through whole conversions: border
//! minimization, the implicit-margin contract and alignment precedence.

use velum::model::{Block, Paragraph, ParagraphDecorator, Segment};
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

// ============================================================================
// Border minimization
// ============================================================================

#[test]
fn test_uniform_border_collapses_to_shorthand() {
    let model = parse("<div style=\"border: 1px solid red\">x</div>");
    let html = write(&model);
    assert!(
        html.contains("border: 1px solid #ff0000"),
        "expected a single border shorthand in {html:?}"
    );
    assert_eq!(
        html.matches("border").count(),
        1,
        "uniform borders must not emit per-side longhands: {html:?}"
    );
}

#[test]
fn test_uniform_components_collapse_to_lists() {
    let model = parse("<div style=\"border-width: 1px 2px; border-style: solid\">x</div>");
    let html = write(&model);
    assert!(html.contains("border-width: 1px 2px"), "got {html:?}");
    assert!(html.contains("border-style: solid"), "got {html:?}");
    assert!(
        !html.contains("border-top"),
        "collapsible components must not fall back to per-side longhands: {html:?}"
    );
}

#[test]
fn test_mixed_borders_emit_per_side() {
    let model =
        parse("<div style=\"border-top: 1px solid red; border-bottom: 2px dashed blue\">x</div>");
    let html = write(&model);
    assert!(html.contains("border-top: 1px solid #ff0000"), "got {html:?}");
    assert!(html.contains("border-bottom: 2px dashed #0000ff"), "got {html:?}");
    assert!(!html.contains("border-left"), "got {html:?}");
}

// ============================================================================
// Implicit-margin contract
// ============================================================================

#[test]
fn test_matching_margins_emit_nothing() {
    // <p> picks up its UA margins at parse time, and those same margins are
    // implied by the tag at write time, so nothing is emitted.
    let html = write(&parse("<p>x</p>"));
    assert_eq!(html, "<p>x</p>");
}

#[test]
fn test_unset_margins_are_zeroed_under_decorator() {
    let mut model = ContentModelDocument::new();
    let mut paragraph = Paragraph::new();
    paragraph.decorator = Some(ParagraphDecorator {
        tag: "p".to_string(),
        format: Format::default(),
    });
    paragraph.segments.push(Segment::text("x", Format::default()));
    model.blocks.push(Block::Paragraph(paragraph));

    let html = write(&model);
    assert!(
        html.contains("margin-top: 0px"),
        "a model with no margins must defeat the UA default: {html:?}"
    );
    assert!(html.contains("margin-bottom: 0px"), "got {html:?}");
}

#[test]
fn test_explicit_zero_margins_round_trip() {
    let html = write(&parse("<div style=\"margin: 4px 0px\">x</div>"));
    assert!(html.contains("margin: 4px 0px"), "got {html:?}");
}

// ============================================================================
// Decorations against tag-implied format
// ============================================================================

#[test]
fn test_unbold_inside_heading_neutralizes() {
    let model = parse("<h1><span style=\"font-weight: normal\">x</span></h1>");
    let html = write(&model);
    assert!(
        html.contains("font-weight: normal"),
        "bold=false under an implicitly bold tag must be emitted: {html:?}"
    );
}

#[test]
fn test_bold_matching_heading_is_suppressed() {
    let html = write(&parse("<h1>x</h1>"));
    assert_eq!(html, "<h1>x</h1>");
}

#[test]
fn test_unbold_without_implicit_survives_reparse() {
    // bold=false with nothing implying bold still has to reach the markup,
    // or the flag silently drops to unset on the next parse.
    let first = parse("<span style=\"font-weight: normal\">x</span>");
    let html = write(&first);
    assert!(html.contains("font-weight: normal"), "got {html:?}");
    assert_eq!(first, parse(&html));
}

#[test]
fn test_decoration_none_is_written_once() {
    // Underline and strikethrough share the text-decoration declaration;
    // clearing both must not duplicate it.
    let mut format = Format::default();
    format.underline = Some(false);
    format.strikethrough = Some(false);
    let mut model = ContentModelDocument::new();
    let mut paragraph = Paragraph::implicit();
    paragraph.segments.push(Segment::text("x", format));
    model.blocks.push(Block::Paragraph(paragraph));

    let html = write(&model);
    assert_eq!(
        html.matches("text-decoration").count(),
        1,
        "got {html:?}"
    );
    assert!(html.contains("text-decoration: none"), "got {html:?}");
}

// ============================================================================
// Alignment precedence
// ============================================================================

#[test]
fn test_html_align_wins_over_text_align() {
    let model = parse("<p align=\"center\" style=\"text-align: right\">x</p>");
    let html = write(&model);
    assert!(html.contains("align=\"center\""), "got {html:?}");
    assert!(
        !html.contains("text-align"),
        "text-align must not be emitted when the align attribute is present: {html:?}"
    );
}

#[test]
fn test_align_attribute_displaces_text_align_in_model() {
    // When both alignment sources appear, the attribute is the one the
    // model keeps; re-parsing the emitted markup reaches a fixed point.
    let first = parse("<p align=\"center\" style=\"text-align: right\">x</p>");
    match &first.blocks[0] {
        Block::Paragraph(paragraph) => {
            assert!(paragraph.format.html_align.is_some());
            assert!(
                paragraph.format.text_align.is_none(),
                "the losing alignment source must not linger in the model"
            );
        }
        other => panic!("expected a paragraph, got {other:?}"),
    }

    let second = parse(&write(&first));
    assert_eq!(first, second);
}
