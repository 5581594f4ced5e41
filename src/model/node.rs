//! Content model tree types.
//!
//! The model is a closed set of sum types: every block, segment and block
//! group kind is an enum variant, so each walker in the crate must match
//! all of them. Nodes own their children outright; there is no sharing and
//! no back-reference into the DOM they came from.

use crate::format::{Dataset, Format};

/// Root of the content model.
///
/// Carries the document-level format snapshot (font family/size of the
/// container) and the zoom scale the model was read under.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentModelDocument {
    pub blocks: Vec<Block>,
    pub format: Format,
    pub zoom_scale: Option<f32>,
}

impl ContentModelDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Divider(Divider),
    ListItem(ListItem),
    Container(FormatContainer),
    Entity(Entity),
}

/// A paragraph: the only block that owns segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    pub format: Format,
    /// The heading/paragraph tag this block renders as, if any. A paragraph
    /// without a decorator writes back as a plain `<div>`.
    pub decorator: Option<ParagraphDecorator>,
    /// Created for loose inline content with no wrapping block element;
    /// writes its segments directly into the parent.
    pub is_implicit: bool,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn implicit() -> Self {
        Self {
            is_implicit: true,
            ..Self::default()
        }
    }
}

/// A `<p>`/`<h1>`-`<h6>` wrapper around a paragraph, with the segment
/// format the tag implies for its content.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphDecorator {
    pub tag: String,
    pub format: Format,
}

/// A generic block wrapper (`<div>`, `<blockquote>`, `<pre>`) holding
/// nested blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatContainer {
    pub tag: String,
    pub format: Format,
    pub blocks: Vec<Block>,
}

/// A horizontal rule or similar standalone divider.
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    pub tag: String,
    pub format: Format,
    pub is_selected: bool,
}

/// One list item, carrying the full chain of list levels it sits under.
///
/// Nesting depth is the length of `levels`; sibling items sharing a level
/// prefix belong to the same list. Numbering is derived at conversion time
/// from thread counters, never stored per item.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub levels: Vec<ListLevel>,
    pub blocks: Vec<Block>,
    pub format: Format,
}

/// One level in a list item's nesting chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLevel {
    pub list_type: ListType,
    pub format: Format,
    pub dataset: Dataset,
}

impl ListLevel {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            format: Format::default(),
            dataset: Dataset::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Ordered,
    Unordered,
}

impl ListType {
    pub fn tag(&self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }
}

/// A table block. The cell grid is rectangular: spanned-over positions are
/// present as cells flagged `span_above`/`span_left`, never omitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Column widths in px; empty when unknown.
    pub widths: Vec<f32>,
    pub format: Format,
    pub dataset: Dataset,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub format: Format,
    /// Row height in px; 0 when unknown.
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub blocks: Vec<Block>,
    pub format: Format,
    pub dataset: Dataset,
    pub is_header: bool,
    pub span_above: bool,
    pub span_left: bool,
    pub is_selected: bool,
}

impl TableCell {
    pub fn spanned(span_above: bool, span_left: bool) -> Self {
        Self {
            span_above,
            span_left,
            ..Self::default()
        }
    }
}

/// Opaque embedded content identified by type and id, round-tripped as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub entity_type: String,
    pub id: Option<String>,
    pub is_readonly: bool,
    /// Serialized HTML of the entity wrapper, regrafted verbatim on write.
    pub html: String,
    pub is_selected: bool,
}

/// An inline node inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(Text),
    Image(Image),
    Br(Br),
    SelectionMarker(SelectionMarker),
    General(GeneralSegment),
    Entity(Entity),
}

impl Segment {
    pub fn text(text: impl Into<String>, format: Format) -> Segment {
        Segment::Text(Text {
            text: text.into(),
            format,
            is_selected: false,
        })
    }

    /// Selection flag of this segment.
    pub fn is_selected(&self) -> bool {
        match self {
            Segment::Text(s) => s.is_selected,
            Segment::Image(s) => s.is_selected,
            Segment::Br(s) => s.is_selected,
            Segment::SelectionMarker(_) => true,
            Segment::General(s) => s.is_selected,
            Segment::Entity(s) => s.is_selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Segment::Text(s) => s.is_selected = selected,
            Segment::Image(s) => s.is_selected = selected,
            Segment::Br(s) => s.is_selected = selected,
            Segment::SelectionMarker(_) => {}
            Segment::General(s) => s.is_selected = selected,
            Segment::Entity(s) => s.is_selected = selected,
        }
    }

    pub fn format(&self) -> Option<&Format> {
        match self {
            Segment::Text(s) => Some(&s.format),
            Segment::Image(s) => Some(&s.format),
            Segment::Br(s) => Some(&s.format),
            Segment::SelectionMarker(s) => Some(&s.format),
            Segment::General(s) => Some(&s.format),
            Segment::Entity(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: String,
    pub format: Format,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub format: Format,
    pub dataset: Dataset,
    pub is_selected: bool,
    /// Set when this image is the single target of an image selection.
    pub is_selected_as_image_selection: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Br {
    pub format: Format,
    pub is_selected: bool,
}

/// Zero-width caret placeholder; always counts as selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionMarker {
    pub format: Format,
}

/// An inline element the model does not interpret, kept as serialized HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSegment {
    pub html: String,
    pub format: Format,
    pub is_selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accessors() {
        let mut segment = Segment::text("hello", Format::default());
        assert!(!segment.is_selected());
        segment.set_selected(true);
        assert!(segment.is_selected());

        let marker = Segment::SelectionMarker(SelectionMarker::default());
        assert!(marker.is_selected());
    }

    #[test]
    fn test_spanned_cell() {
        let cell = TableCell::spanned(true, false);
        assert!(cell.span_above);
        assert!(!cell.span_left);
        assert!(cell.blocks.is_empty());
    }
}
