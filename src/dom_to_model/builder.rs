//! The DOM walk that builds a content model.

use crate::dom::{DomNodeId, DomTree, serialize::serialize_node};
use crate::format::{
    Dataset, Format, FormatKey, FormatRegistry, FormatScope, StyledElement,
    defaults::is_block_tag,
};
use crate::metadata::EDITING_INFO_DATASET_NAME;
use crate::model::{
    Block, Br, ContentModelDocument, Divider, Entity, FormatContainer, GeneralSegment, Image,
    ListItem, ListLevel, ListType, Paragraph, ParagraphDecorator, Segment, SelectionMarker,
    TableCell, TableRow, Text,
};

use super::context::{BlockSink, DomToModelContext, DomToModelOptions, ProcessorKey};

pub struct ModelBuilder<'a> {
    dom: &'a DomTree,
    registry: &'a FormatRegistry,
    options: &'a DomToModelOptions,
    pub ctx: DomToModelContext,
}

/// Convert a DOM subtree rooted at `root` into a content model document.
pub fn dom_to_model(
    dom: &DomTree,
    root: DomNodeId,
    options: &DomToModelOptions,
) -> ContentModelDocument {
    let mut builder = ModelBuilder {
        dom,
        registry: &options.registry,
        options,
        ctx: DomToModelContext::new(options),
    };

    let mut document = ContentModelDocument::new();
    document.zoom_scale = options.zoom_scale;
    document.format = builder.parse_format(FormatScope::Segment, root);
    builder.ctx.segment_format = document.format.clone();

    let mut sink = BlockSink::new(&mut document.blocks);
    builder.process_children(root, &mut sink);
    sink.close_paragraph();
    document
}

impl<'a> ModelBuilder<'a> {
    pub fn dom(&self) -> &'a DomTree {
        self.dom
    }

    fn parse_format(&mut self, scope: FormatScope, node: DomNodeId) -> Format {
        let mut format = Format::default();
        if let Some(element) = StyledElement::new(self.dom, node) {
            self.registry
                .parse(scope, &mut format, &element, &mut self.ctx.parse);
        }
        format
    }

    fn parse_keys(&mut self, keys: &[FormatKey], format: &mut Format, node: DomNodeId) {
        if let Some(element) = StyledElement::new(self.dom, node) {
            for key in keys {
                (self.registry.handler(*key).parse)(format, &element, &mut self.ctx.parse);
            }
        }
    }

    fn read_dataset(&self, node: DomNodeId) -> Dataset {
        let mut dataset = Dataset::new();
        if let Some(crate::dom::NodeData::Element { attrs, .. }) = self.dom.get(node).map(|n| &n.data)
        {
            for attr in attrs {
                if let Some(name) = attr.name.local.as_ref().strip_prefix("data-") {
                    dataset.set(name, attr.value.clone());
                }
            }
        }
        dataset
    }

    pub fn process_children(&mut self, parent: DomNodeId, sink: &mut BlockSink<'_>) {
        let children: Vec<_> = self.dom.children(parent).collect();
        for (offset, child) in children.iter().enumerate() {
            self.check_element_boundary(parent, offset, sink);
            self.process_node(*child, sink);
        }
        self.check_element_boundary(parent, children.len(), sink);
    }

    fn check_element_boundary(&mut self, parent: DomNodeId, offset: usize, sink: &mut BlockSink<'_>) {
        let Some(selection) = self.ctx.selection.clone() else {
            return;
        };
        if selection.start.node == parent && selection.start.offset == offset {
            if selection.is_collapsed() {
                self.push_marker(sink);
            } else {
                self.ctx.in_selection = true;
            }
        }
        if !selection.is_collapsed() && selection.end.node == parent && selection.end.offset == offset
        {
            self.ctx.in_selection = false;
        }
    }

    fn push_marker(&mut self, sink: &mut BlockSink<'_>) {
        sink.paragraph()
            .segments
            .push(Segment::SelectionMarker(SelectionMarker {
                format: self.ctx.segment_format.clone(),
            }));
    }

    fn process_node(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        if self.dom.is_text(node) {
            self.process_text(node, sink);
        } else if self.dom.is_element(node) {
            self.process_element(node, sink);
        }
        // Comments and doctypes carry no model content.
    }

    fn process_element(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        if let Some(entity) = self.parse_entity(node) {
            let tag = self.dom.element_name(node).map(|n| n.to_string());
            if tag.as_deref().is_some_and(is_block_tag) {
                sink.push_block(Block::Entity(entity));
            } else {
                sink.paragraph().segments.push(Segment::Entity(entity));
            }
            return;
        }

        let Some(tag) = self.dom.element_name(node) else {
            return;
        };
        let tag = tag.to_string();
        match tag.as_str() {
            "br" => {
                let segment = Segment::Br(Br {
                    format: self.ctx.segment_format.clone(),
                    is_selected: self.ctx.in_selection,
                });
                sink.paragraph().segments.push(segment);
            }
            "img" => self.dispatch(ProcessorKey::Image, Self::process_image, node, sink),
            "hr" => self.dispatch(ProcessorKey::Divider, Self::process_divider, node, sink),
            "table" => self.dispatch(ProcessorKey::Table, Self::process_table, node, sink),
            "ol" | "ul" => self.dispatch(ProcessorKey::List, Self::process_list, node, sink),
            "li" => self.process_list_item(node, sink),
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.process_paragraph(node, sink, true)
            }
            "div" => {
                if self.has_block_children(node) {
                    self.process_container(node, sink);
                } else {
                    self.process_paragraph(node, sink, false);
                }
            }
            "blockquote" | "pre" | "center" | "section" | "article" | "aside" | "main" | "nav"
            | "header" | "footer" | "figure" => self.process_container(node, sink),
            "span" | "b" | "strong" | "i" | "em" | "u" | "ins" | "s" | "strike" | "del" | "sub"
            | "sup" | "font" | "code" | "tt" | "kbd" | "samp" | "var" | "cite" | "dfn" => {
                self.process_inline(node, sink)
            }
            "script" | "style" | "head" | "title" | "meta" | "link" | "colgroup" | "col" => {}
            "html" | "body" | "tbody" | "thead" | "tfoot" => self.process_children(node, sink),
            _ => {
                if is_block_tag(&tag) {
                    self.process_container(node, sink);
                } else {
                    self.process_general(node, sink);
                }
            }
        }
    }

    fn dispatch(
        &mut self,
        key: ProcessorKey,
        default: fn(&mut Self, DomNodeId, &mut BlockSink<'_>),
        node: DomNodeId,
        sink: &mut BlockSink<'_>,
    ) {
        match self.options.processors.get(key) {
            Some(processor) => processor(self, node, sink),
            None => default(self, node, sink),
        }
    }

    fn has_block_children(&self, node: DomNodeId) -> bool {
        self.dom.children(node).any(|child| {
            self.dom
                .element_name(child)
                .is_some_and(|name| is_block_tag(name.as_ref()))
        })
    }

    fn parse_entity(&self, node: DomNodeId) -> Option<Entity> {
        let class = self.dom.get_attr(node, "class")?;
        let mut tokens = class.split_ascii_whitespace();
        if !tokens.any(|t| t == "_Entity") {
            return None;
        }
        let mut entity = Entity {
            entity_type: String::new(),
            id: None,
            is_readonly: false,
            html: serialize_node(self.dom, node),
            is_selected: self.ctx.in_selection,
        };
        for token in class.split_ascii_whitespace() {
            if let Some(entity_type) = token.strip_prefix("_EType_") {
                entity.entity_type = entity_type.to_string();
            } else if let Some(id) = token.strip_prefix("_EId_") {
                entity.id = Some(id.to_string());
            } else if token == "_EReadonly_1" {
                entity.is_readonly = true;
            }
        }
        Some(entity)
    }

    fn process_text(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let Some(raw) = self.dom.text_content(node) else {
            return;
        };
        let preserve = self
            .ctx
            .segment_format
            .white_space
            .as_deref()
            .is_some_and(|w| w.starts_with("pre"));
        if !preserve && raw.trim().is_empty() {
            return;
        }
        let text = raw.to_string();

        if let Some(selection) = self.ctx.selection.clone() {
            let starts = selection.start.node == node;
            let ends = selection.end.node == node;
            if starts && selection.is_collapsed() {
                let (head, tail) = split_at_char(&text, selection.start.offset);
                self.add_text(sink, head);
                self.push_marker(sink);
                self.add_text(sink, tail);
                return;
            }
            if starts || ends {
                if starts {
                    let (head, rest) = split_at_char(&text, selection.start.offset);
                    self.add_text(sink, head);
                    self.ctx.in_selection = true;
                    if ends {
                        let (middle, tail) =
                            split_at_char(rest, selection.end.offset - selection.start.offset);
                        self.add_text(sink, middle);
                        self.ctx.in_selection = false;
                        self.add_text(sink, tail);
                    } else {
                        self.add_text(sink, rest);
                    }
                } else {
                    let (head, tail) = split_at_char(&text, selection.end.offset);
                    self.add_text(sink, head);
                    self.ctx.in_selection = false;
                    self.add_text(sink, tail);
                }
                return;
            }
        }

        self.add_text(sink, &text);
    }

    fn add_text(&mut self, sink: &mut BlockSink<'_>, text: &str) {
        if text.is_empty() {
            return;
        }
        let segment = Segment::Text(Text {
            text: text.to_string(),
            format: self.ctx.segment_format.clone(),
            is_selected: self.ctx.in_selection,
        });
        sink.paragraph().segments.push(segment);
    }

    fn process_inline(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let added = self.parse_format(FormatScope::Segment, node);
        let saved = self.ctx.segment_format.clone();
        self.ctx.segment_format = saved.extend(&added);
        self.process_children(node, sink);
        self.ctx.segment_format = saved;
    }

    fn process_general(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let segment = Segment::General(GeneralSegment {
            html: serialize_node(self.dom, node),
            format: self.ctx.segment_format.clone(),
            is_selected: self.ctx.in_selection,
        });
        sink.paragraph().segments.push(segment);
    }

    fn process_paragraph(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>, decorated: bool) {
        let format = self.parse_format(FormatScope::Block, node);
        let segment_add = self.parse_format(FormatScope::Segment, node);
        let decorator = if decorated {
            let tag = self
                .dom
                .element_name(node)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "p".to_string());
            Some(ParagraphDecorator {
                tag,
                format: segment_add.clone(),
            })
        } else {
            None
        };

        sink.open_paragraph(Paragraph {
            segments: Vec::new(),
            format,
            decorator,
            is_implicit: false,
        });

        let saved = self.ctx.segment_format.clone();
        self.ctx.segment_format = saved.extend(&segment_add);
        self.process_children(node, sink);
        self.ctx.segment_format = saved;
        sink.close_paragraph();
    }

    fn process_container(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let tag = self
            .dom
            .element_name(node)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "div".to_string());
        let format = self.parse_format(FormatScope::Block, node);
        let segment_add = self.parse_format(FormatScope::Segment, node);

        let saved = self.ctx.segment_format.clone();
        self.ctx.segment_format = saved.extend(&segment_add);
        let mut blocks = Vec::new();
        {
            let mut inner = BlockSink::new(&mut blocks);
            self.process_children(node, &mut inner);
            inner.close_paragraph();
        }
        self.ctx.segment_format = saved;

        sink.push_block(Block::Container(FormatContainer { tag, format, blocks }));
    }

    fn process_divider(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let tag = self
            .dom
            .element_name(node)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "hr".to_string());
        sink.push_block(Block::Divider(Divider {
            tag,
            format: self.parse_format(FormatScope::Block, node),
            is_selected: self.ctx.in_selection,
        }));
    }

    fn process_image(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let mut format = self.ctx.segment_format.clone();
        let added = self.parse_format(FormatScope::Segment, node);
        format = format.extend(&added);
        self.parse_keys(
            &[
                FormatKey::Id,
                FormatKey::Size,
                FormatKey::Margin,
                FormatKey::Padding,
            ],
            &mut format,
            node,
        );

        let image = Image {
            src: self.dom.get_attr(node, "src").unwrap_or("").to_string(),
            alt: self.dom.get_attr(node, "alt").map(str::to_string),
            title: self.dom.get_attr(node, "title").map(str::to_string),
            format,
            dataset: self.read_dataset(node),
            is_selected: self.ctx.in_selection,
            is_selected_as_image_selection: false,
        };
        sink.paragraph().segments.push(Segment::Image(image));
    }

    fn process_list(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let list_type = match self.dom.element_name(node).map(|n| n.to_string()).as_deref() {
            Some("ol") => ListType::Ordered,
            _ => ListType::Unordered,
        };

        self.ctx.parse.list.open_level();
        let mut level = ListLevel::new(list_type);
        level.format = self.parse_format(FormatScope::ListLevel, node);
        if let Some(raw) = self.dom.get_dataset(node, EDITING_INFO_DATASET_NAME) {
            level
                .dataset
                .set(EDITING_INFO_DATASET_NAME, raw.to_string());
        }
        self.ctx.levels.push(level);

        let children: Vec<_> = self.dom.children(node).collect();
        for child in children {
            match self.dom.element_name(child).map(|n| n.to_string()).as_deref() {
                Some("li") => self.process_list_item(child, sink),
                Some("ol" | "ul") => self.process_list(child, sink),
                _ => {}
            }
        }

        self.ctx.levels.pop();
        self.ctx.parse.list.close_level();
    }

    fn process_list_item(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        if self.ctx.levels.is_empty() {
            // A loose li outside any list reads as a plain paragraph.
            self.process_paragraph(node, sink, false);
            return;
        }
        self.ctx.parse.list.next_item();

        let mut item = ListItem {
            levels: self.ctx.levels.clone(),
            blocks: Vec::new(),
            format: self.parse_format(FormatScope::ListItem, node),
        };

        // Lists nested under the item become their own deeper-level items
        // after this one, so only the remaining children fill the item.
        let children: Vec<_> = self.dom.children(node).collect();
        let is_list = |builder: &Self, child: DomNodeId| {
            matches!(
                builder.dom.element_name(child).map(|n| n.to_string()).as_deref(),
                Some("ol" | "ul")
            )
        };

        let segment_add = self.parse_format(FormatScope::Segment, node);
        let saved = self.ctx.segment_format.clone();
        self.ctx.segment_format = saved.extend(&segment_add);
        {
            let mut inner = BlockSink::new(&mut item.blocks);
            for child in &children {
                if !is_list(self, *child) {
                    self.process_node(*child, &mut inner);
                }
            }
            inner.close_paragraph();
        }
        self.ctx.segment_format = saved;

        sink.push_block(Block::ListItem(item));

        for child in children {
            if is_list(self, child) {
                self.process_list(child, sink);
            }
        }
    }

    fn process_table(&mut self, node: DomNodeId, sink: &mut BlockSink<'_>) {
        let mut table = crate::model::Table {
            rows: Vec::new(),
            widths: Vec::new(),
            format: self.parse_format(FormatScope::Table, node),
            dataset: Dataset::new(),
        };
        if let Some(raw) = self.dom.get_dataset(node, EDITING_INFO_DATASET_NAME) {
            table
                .dataset
                .set(EDITING_INFO_DATASET_NAME, raw.to_string());
        }

        // (remaining rowspan, covered-by-colspan) per grid column.
        let mut pending: Vec<(u32, bool)> = Vec::new();

        for tr in self.table_rows(node) {
            let mut row = TableRow {
                cells: Vec::new(),
                format: self.parse_format(FormatScope::Block, tr),
                height: self
                    .dom
                    .style_entries(tr)
                    .iter()
                    .rev()
                    .find(|(p, _)| p == "height")
                    .and_then(|(_, v)| crate::format::css::parse_length(v))
                    .map(|l| l.to_px(16.0, 0.0))
                    .unwrap_or(0.0),
            };

            let mut column = 0usize;
            let cells: Vec<_> = self
                .dom
                .children(tr)
                .filter(|c| {
                    matches!(
                        self.dom.element_name(*c).map(|n| n.to_string()).as_deref(),
                        Some("td" | "th")
                    )
                })
                .collect();

            for cell_node in cells {
                while column < pending.len() && pending[column].0 > 0 {
                    let span_left = pending[column].1;
                    row.cells.push(TableCell::spanned(true, span_left));
                    pending[column].0 -= 1;
                    column += 1;
                }

                let colspan = attr_span(self.dom, cell_node, "colspan");
                let rowspan = attr_span(self.dom, cell_node, "rowspan");
                let is_header = self
                    .dom
                    .element_name(cell_node)
                    .is_some_and(|n| n.as_ref() == "th");

                let mut cell = TableCell {
                    blocks: Vec::new(),
                    format: self.parse_format(FormatScope::TableCell, cell_node),
                    dataset: self.read_dataset(cell_node),
                    is_header,
                    span_above: false,
                    span_left: false,
                    is_selected: self.ctx.in_selection,
                };
                let segment_add = self.parse_format(FormatScope::Segment, cell_node);
                let saved = self.ctx.segment_format.clone();
                self.ctx.segment_format = saved.extend(&segment_add);
                {
                    let mut inner = BlockSink::new(&mut cell.blocks);
                    self.process_children(cell_node, &mut inner);
                    inner.close_paragraph();
                }
                self.ctx.segment_format = saved;
                row.cells.push(cell);

                for offset in 0..colspan as usize {
                    let at = column + offset;
                    if pending.len() <= at {
                        pending.resize(at + 1, (0, false));
                    }
                    if rowspan > 1 {
                        pending[at] = (rowspan - 1, offset > 0);
                    }
                    if offset > 0 {
                        row.cells.push(TableCell::spanned(false, true));
                    }
                }
                column += colspan as usize;
            }

            while column < pending.len() {
                if pending[column].0 > 0 {
                    let span_left = pending[column].1;
                    row.cells.push(TableCell::spanned(true, span_left));
                    pending[column].0 -= 1;
                }
                column += 1;
            }

            table.rows.push(row);
        }

        table.widths = derive_column_widths(&table);
        sink.push_block(Block::Table(table));
    }

    fn table_rows(&self, table: DomNodeId) -> Vec<DomNodeId> {
        let mut rows = Vec::new();
        for child in self.dom.children(table) {
            match self.dom.element_name(child).map(|n| n.to_string()).as_deref() {
                Some("tr") => rows.push(child),
                Some("thead" | "tbody" | "tfoot") => {
                    for tr in self.dom.children(child) {
                        if self.dom.element_name(tr).is_some_and(|n| n.as_ref() == "tr") {
                            rows.push(tr);
                        }
                    }
                }
                _ => {}
            }
        }
        rows
    }
}

fn attr_span(dom: &DomTree, node: DomNodeId, name: &str) -> u32 {
    dom.get_attr(node, name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(1)
}

/// Column widths from the first row that spans no columns; empty when no
/// cell declares a pixel width.
fn derive_column_widths(table: &crate::model::Table) -> Vec<f32> {
    use crate::format::CssLength;
    for row in &table.rows {
        if row.cells.iter().any(|c| c.span_left || c.span_above) {
            continue;
        }
        let widths: Vec<f32> = row
            .cells
            .iter()
            .map(|cell| match cell.format.width {
                Some(CssLength::Px(v)) => v,
                _ => 0.0,
            })
            .collect();
        if widths.iter().any(|w| *w > 0.0) {
            return widths;
        }
    }
    Vec::new()
}

fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(byte)
}
