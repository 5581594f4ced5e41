//! Content model to DOM conversion.

pub mod context;
pub mod writer;

pub use context::{CreatedNode, ModelToDomOptions, OnNodeCreated};
pub use writer::{ModelWriter, model_to_dom, model_to_dom_with_callback};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::serialize_children;
    use crate::format::{CssLength, Format};
    use crate::model::{
        Block, ContentModelDocument, ListItem, ListLevel, ListType, Paragraph, Segment, Table,
        TableCell, TableRow,
    };

    fn html_of(model: &ContentModelDocument) -> String {
        let (dom, root) = model_to_dom(model, &ModelToDomOptions::default()).unwrap();
        serialize_children(&dom, root)
    }

    #[test]
    fn test_bold_text_wraps_tag() {
        let mut model = ContentModelDocument::new();
        let mut format = Format::default();
        format.bold = Some(true);
        let mut paragraph = Paragraph::implicit();
        paragraph.segments.push(Segment::text("hi", format));
        model.blocks.push(Block::Paragraph(paragraph));

        assert_eq!(html_of(&model), "<b>hi</b>");
    }

    #[test]
    fn test_plain_text_stays_bare() {
        let mut model = ContentModelDocument::new();
        let mut paragraph = Paragraph::implicit();
        paragraph.segments.push(Segment::text("hi", Format::default()));
        model.blocks.push(Block::Paragraph(paragraph));

        assert_eq!(html_of(&model), "hi");
    }

    #[test]
    fn test_sibling_items_share_list_element() {
        let mut model = ContentModelDocument::new();
        for text in ["a", "b"] {
            let mut paragraph = Paragraph::implicit();
            paragraph.segments.push(Segment::text(text, Format::default()));
            model.blocks.push(Block::ListItem(ListItem {
                levels: vec![ListLevel::new(ListType::Ordered)],
                blocks: vec![Block::Paragraph(paragraph)],
                format: Format::default(),
            }));
        }

        assert_eq!(html_of(&model), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let mut model = ContentModelDocument::new();
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec![TableCell::default(), TableCell::default()],
                    ..Default::default()
                },
                TableRow {
                    cells: vec![TableCell::default()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        model.blocks.push(Block::Table(table));

        assert!(matches!(
            model_to_dom(&model, &ModelToDomOptions::default()),
            Err(crate::error::Error::InvalidTable(_))
        ));
    }

    #[test]
    fn test_span_cells_are_suppressed() {
        let mut model = ContentModelDocument::new();
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec![TableCell::default(), TableCell::spanned(false, true)],
                    ..Default::default()
                },
                TableRow {
                    cells: vec![TableCell::default(), TableCell::default()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        model.blocks.push(Block::Table(table));

        let html = html_of(&model);
        assert!(html.contains("colspan=\"2\""));
        assert_eq!(html.matches("<td").count(), 3);
    }

    #[test]
    fn test_on_node_created_sees_every_block() {
        let mut model = ContentModelDocument::new();
        let mut paragraph = Paragraph::new();
        paragraph.segments.push(Segment::text("x", Format::default()));
        model.blocks.push(Block::Paragraph(paragraph));

        let mut segments = Vec::new();
        let mut blocks = Vec::new();
        let (dom, _) = model_to_dom_with_callback(
            &model,
            &ModelToDomOptions::default(),
            &mut |node, id| match node {
                CreatedNode::Segment(_) => segments.push(id),
                CreatedNode::Block(_) => blocks.push(id),
                _ => {}
            },
        )
        .unwrap();
        assert_eq!(segments.len(), 1);
        assert!(dom.get(segments[0]).is_some());

        // An explicit paragraph materializes a div; the callback must see it.
        assert_eq!(blocks.len(), 1);
        assert_eq!(dom.element_name(blocks[0]).map(|n| n.as_ref()), Some("div"));
    }

    #[test]
    fn test_margin_contract_zeroes_implied_sides() {
        // A p decorator implies 1em vertical margins; a model without them
        // must explicitly zero those sides.
        let mut model = ContentModelDocument::new();
        let mut paragraph = Paragraph::new();
        paragraph.decorator = Some(crate::model::ParagraphDecorator {
            tag: "p".to_string(),
            format: Format::default(),
        });
        paragraph.segments.push(Segment::text("x", Format::default()));
        model.blocks.push(Block::Paragraph(paragraph));

        let html = html_of(&model);
        assert!(html.contains("margin-top: 0px"));
        assert!(html.contains("margin-bottom: 0px"));

        // With margins matching the implied value, nothing is emitted.
        let mut model = ContentModelDocument::new();
        let mut paragraph = Paragraph::new();
        paragraph.decorator = Some(crate::model::ParagraphDecorator {
            tag: "p".to_string(),
            format: Format::default(),
        });
        paragraph.format.margin.top = Some(CssLength::Em(1.0));
        paragraph.format.margin.bottom = Some(CssLength::Em(1.0));
        paragraph.segments.push(Segment::text("x", Format::default()));
        model.blocks.push(Block::Paragraph(paragraph));

        let html = html_of(&model);
        assert!(!html.contains("margin"));
    }
}
