//! DOM to content model conversion.

pub mod builder;
pub mod context;

pub use builder::{ModelBuilder, dom_to_model};
pub use context::{
    BlockSink, DomToModelContext, DomToModelOptions, ElementProcessor, ProcessorKey,
    ProcessorOverrides,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;
    use crate::model::{Block, ListType, Segment};

    fn model_of(html: &str) -> crate::model::ContentModelDocument {
        let (dom, body) = parse_fragment(html);
        dom_to_model(&dom, body, &DomToModelOptions::default())
    }

    #[test]
    fn test_loose_text_becomes_implicit_paragraph() {
        let model = model_of("hello <b>world</b>");
        assert_eq!(model.blocks.len(), 1);
        let Block::Paragraph(paragraph) = &model.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(paragraph.is_implicit);
        assert_eq!(paragraph.segments.len(), 2);
        let Segment::Text(bold) = &paragraph.segments[1] else {
            panic!("expected text");
        };
        assert_eq!(bold.text, "world");
        assert_eq!(bold.format.bold, Some(true));
    }

    #[test]
    fn test_heading_decorator() {
        let model = model_of("<h1>Title</h1>");
        let Block::Paragraph(paragraph) = &model.blocks[0] else {
            panic!("expected paragraph");
        };
        let decorator = paragraph.decorator.as_ref().unwrap();
        assert_eq!(decorator.tag, "h1");
        assert_eq!(decorator.format.bold, Some(true));
        // The h1 margins land on the block format.
        assert!(paragraph.format.margin.top.is_some());
    }

    #[test]
    fn test_nested_list_levels() {
        let model = model_of("<ol><li>a</li><ul><li>b</li></ul></ol>");
        assert_eq!(model.blocks.len(), 2);
        let Block::ListItem(first) = &model.blocks[0] else {
            panic!("expected list item");
        };
        assert_eq!(first.levels.len(), 1);
        assert_eq!(first.levels[0].list_type, ListType::Ordered);

        let Block::ListItem(second) = &model.blocks[1] else {
            panic!("expected list item");
        };
        assert_eq!(second.levels.len(), 2);
        assert_eq!(second.levels[1].list_type, ListType::Unordered);
    }

    #[test]
    fn test_table_span_grid_is_rectangular() {
        let model = model_of(
            "<table><tr><td rowspan=\"2\">a</td><td>b</td></tr><tr><td>c</td></tr></table>",
        );
        let Block::Table(table) = &model.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[1].cells.len(), 2);
        assert!(table.rows[1].cells[0].span_above);
        assert!(!table.rows[1].cells[1].span_above);
    }

    #[test]
    fn test_colspan_marks_span_left() {
        let model =
            model_of("<table><tr><td colspan=\"2\">a</td></tr><tr><td>b</td><td>c</td></tr></table>");
        let Block::Table(table) = &model.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0].cells.len(), 2);
        assert!(table.rows[0].cells[1].span_left);
    }

    #[test]
    fn test_processor_override() {
        fn stub_table(
            builder: &mut ModelBuilder<'_>,
            _node: crate::dom::DomNodeId,
            sink: &mut BlockSink<'_>,
        ) {
            let _ = builder;
            sink.push_block(Block::Divider(crate::model::Divider {
                tag: "hr".to_string(),
                format: Default::default(),
                is_selected: false,
            }));
        }

        let (dom, body) = parse_fragment("<table><tr><td>x</td></tr></table>");
        let options = DomToModelOptions {
            processors: ProcessorOverrides::new().set(ProcessorKey::Table, stub_table),
            ..Default::default()
        };
        let model = dom_to_model(&dom, body, &options);
        assert!(matches!(model.blocks[0], Block::Divider(_)));
    }

    #[test]
    fn test_collapsed_selection_inserts_marker() {
        use crate::dom::{DomPosition, DomRange};

        let (dom, body) = parse_fragment("<div>abc</div>");
        let div = dom.find_by_tag("div").unwrap();
        let text = dom.children(div).next().unwrap();
        let options = DomToModelOptions {
            selection: Some(DomRange {
                start: DomPosition {
                    node: text,
                    offset: 1,
                },
                end: DomPosition {
                    node: text,
                    offset: 1,
                },
            }),
            ..Default::default()
        };
        let model = dom_to_model(&dom, body, &options);
        let Block::Paragraph(paragraph) = &model.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.segments.len(), 3);
        assert!(matches!(paragraph.segments[1], Segment::SelectionMarker(_)));
        let Segment::Text(head) = &paragraph.segments[0] else {
            panic!("expected text");
        };
        assert_eq!(head.text, "a");
    }

    #[test]
    fn test_range_selection_marks_segments() {
        use crate::dom::{DomPosition, DomRange};

        let (dom, body) = parse_fragment("<div>abcdef</div>");
        let div = dom.find_by_tag("div").unwrap();
        let text = dom.children(div).next().unwrap();
        let options = DomToModelOptions {
            selection: Some(DomRange {
                start: DomPosition {
                    node: text,
                    offset: 2,
                },
                end: DomPosition {
                    node: text,
                    offset: 4,
                },
            }),
            ..Default::default()
        };
        let model = dom_to_model(&dom, body, &options);
        let Block::Paragraph(paragraph) = &model.blocks[0] else {
            panic!("expected paragraph");
        };
        let texts: Vec<(&str, bool)> = paragraph
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Text(t) => Some((t.text.as_str(), t.is_selected)),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![("ab", false), ("cd", true), ("ef", false)]);
    }
}
