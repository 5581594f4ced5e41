//! List numbering threads and list metadata, end to end.

use velum::model::{Block, ListItem};
use velum::{
    ContentModelDocument, DomToModelOptions, ListMetadata, ModelToDomOptions,
    create_model_from_html, model_to_html, read_metadata,
};

fn parse(html: &str) -> ContentModelDocument {
    create_model_from_html(html, &DomToModelOptions::default())
}

fn write(model: &ContentModelDocument) -> String {
    model_to_html(model, &ModelToDomOptions::default()).expect("model should be writable")
}

fn list_item(model: &ContentModelDocument, index: usize) -> &ListItem {
    match &model.blocks[index] {
        Block::ListItem(item) => item,
        other => panic!("expected list item at block {index}, got {other:?}"),
    }
}

// ============================================================================
// Numbering threads
// ============================================================================

#[test]
fn test_sibling_lists_continue_numbering() {
    let first = parse("<ol><li>a</li><li>b</li></ol><p>x</p><ol><li>c</li></ol>");

    // No start attribute means continuation, not restart.
    assert_eq!(list_item(&first, 0).levels[0].format.start_number_override, None);
    assert_eq!(list_item(&first, 2).levels[0].format.start_number_override, None);

    // The second list resumes at 3 in the emitted markup, and re-parsing
    // that markup reads it back as a continuation of the same thread.
    let emitted = write(&first);
    assert!(emitted.contains("start=\"3\""), "got {emitted:?}");
    let second = parse(&emitted);
    assert_eq!(first, second);
}

#[test]
fn test_explicit_start_is_honored() {
    let model = parse("<ol start=\"5\"><li>a</li></ol>");
    assert_eq!(list_item(&model, 0).levels[0].format.start_number_override, Some(5));

    let emitted = write(&model);
    assert!(emitted.contains("start=\"5\""), "got {emitted:?}");
}

#[test]
fn test_explicit_restart_survives() {
    let first = parse("<ol><li>a</li><li>b</li></ol><p>x</p><ol start=\"1\"><li>c</li></ol>");
    assert_eq!(list_item(&first, 2).levels[0].format.start_number_override, Some(1));

    let emitted = write(&first);
    assert!(emitted.contains("start=\"1\""), "an explicit restart must survive: {emitted:?}");
    let second = parse(&emitted);
    assert_eq!(first, second);
}

#[test]
fn test_list_levels_keep_native_spacing() {
    // Lists are not paragraph decorators: a level without margins in the
    // model keeps the UA spacing instead of picking up explicit zeroes.
    let emitted = write(&parse("<ol><li>a</li><li>b</li></ol>"));
    assert_eq!(emitted, "<ol><li>a</li><li>b</li></ol>");
}

#[test]
fn test_legacy_type_attribute_maps_to_list_style() {
    let model = parse("<ol type=\"A\"><li>a</li></ol>");
    assert_eq!(
        list_item(&model, 0).levels[0].format.list_style_type.as_deref(),
        Some("upper-alpha")
    );
}

// ============================================================================
// List metadata
// ============================================================================

#[test]
fn test_metadata_drives_marker_emission() {
    // Style 5 is a plain keyword, set once on the list element.
    let model = parse("<ol data-editing-info='{\"orderedStyleType\":5}'><li>a</li></ol>");
    let metadata: ListMetadata =
        read_metadata(&list_item(&model, 0).levels[0].dataset).expect("metadata should validate");
    assert_eq!(metadata.ordered_style_type, Some(5));

    let emitted = write(&model);
    assert!(emitted.contains("list-style-type: lower-alpha"), "got {emitted:?}");
    assert!(emitted.contains("data-editing-info"), "metadata must persist: {emitted:?}");
}

#[test]
fn test_template_marker_is_emitted_per_item() {
    // Style 3 has no CSS keyword, so each item carries a quoted marker
    // string with its own number substituted in.
    let model = parse(
        "<ol data-editing-info='{\"orderedStyleType\":3}'><li>a</li><li>b</li></ol>",
    );
    let emitted = write(&model);
    assert!(emitted.contains("list-style-type: &quot;1) &quot;"), "got {emitted:?}");
    assert!(emitted.contains("list-style-type: &quot;2) &quot;"), "got {emitted:?}");
}

#[test]
fn test_out_of_range_metadata_field_reads_absent() {
    let model = parse("<ol data-editing-info='{\"orderedStyleType\":15}'><li>a</li></ol>");
    let metadata: ListMetadata =
        read_metadata(&list_item(&model, 0).levels[0].dataset).expect("blob itself is valid");
    assert_eq!(metadata.ordered_style_type, None);
}

#[test]
fn test_malformed_metadata_reads_as_none() {
    let model = parse("<ol data-editing-info='not json'><li>a</li></ol>");
    let metadata: Option<ListMetadata> = read_metadata(&list_item(&model, 0).levels[0].dataset);
    assert_eq!(metadata, None);
}
