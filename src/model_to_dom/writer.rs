//! The model walk that materializes DOM nodes.

use crate::dom::{DomNodeId, DomTree, NodeData};
use crate::error::{Error, Result};
use crate::format::{
    ApplyContext, Format, FormatKey, FormatRegistry, FormatScope,
    defaults::implicit_format,
};
use crate::metadata::{ListMetadata, read_metadata};
use crate::model::{
    Block, ContentModelDocument, Divider, Entity, FormatContainer, GeneralSegment, Image,
    ListItem, ListType, Paragraph, Segment, Table, Text,
};

use super::context::{CreatedNode, ModelToDomOptions};

pub struct ModelWriter<'a, 'cb> {
    registry: &'a FormatRegistry,
    dom: DomTree,
    ctx: ApplyContext,
    /// Currently open list elements, innermost last.
    list_stack: Vec<(ListType, DomNodeId)>,
    on_node_created: Option<&'cb mut dyn FnMut(CreatedNode<'_>, DomNodeId)>,
}

/// Materialize a content model into a fresh DOM tree.
///
/// Returns the tree and the container element holding the written content.
pub fn model_to_dom(
    model: &ContentModelDocument,
    options: &ModelToDomOptions,
) -> Result<(DomTree, DomNodeId)> {
    write_model(model, options, None)
}

/// Like [`model_to_dom`], invoking `on_node_created` for every node pair.
pub fn model_to_dom_with_callback(
    model: &ContentModelDocument,
    options: &ModelToDomOptions,
    on_node_created: &mut dyn FnMut(CreatedNode<'_>, DomNodeId),
) -> Result<(DomTree, DomNodeId)> {
    write_model(model, options, Some(on_node_created))
}

fn write_model(
    model: &ContentModelDocument,
    options: &ModelToDomOptions,
    on_node_created: Option<&mut dyn FnMut(CreatedNode<'_>, DomNodeId)>,
) -> Result<(DomTree, DomNodeId)> {
    let mut dom = DomTree::new();
    let root = dom.create_tag("div");
    let document = dom.document();
    dom.append(document, root);

    let mut ctx = ApplyContext::default();
    if let Some(zoom) = options.zoom_scale {
        ctx.zoom_scale = zoom;
    }

    let mut writer = ModelWriter {
        registry: &options.registry,
        dom,
        ctx,
        list_stack: Vec::new(),
        on_node_created,
    };
    writer.write_blocks(&model.blocks, root, &model.format)?;
    Ok((writer.dom, root))
}

impl ModelWriter<'_, '_> {
    fn notify(&mut self, created: CreatedNode<'_>, node: DomNodeId) {
        if let Some(callback) = self.on_node_created.as_mut() {
            callback(created, node);
        }
    }

    fn apply(&mut self, scope: FormatScope, format: &Format, node: DomNodeId, implicit: Format) {
        self.ctx.implicit = implicit;
        self.registry
            .apply(scope, format, node, &mut self.dom, &mut self.ctx);
    }

    fn apply_keys(&mut self, keys: &[FormatKey], format: &Format, node: DomNodeId) {
        for key in keys {
            (self.registry.handler(*key).apply)(format, node, &mut self.dom, &mut self.ctx);
        }
    }

    fn write_blocks(
        &mut self,
        blocks: &[Block],
        parent: DomNodeId,
        segment_implicit: &Format,
    ) -> Result<()> {
        let list_base = self.list_stack.len();
        for block in blocks {
            if !matches!(block, Block::ListItem(_)) {
                self.close_lists_to(list_base);
            }
            match block {
                Block::Paragraph(paragraph) => {
                    self.write_paragraph(block, paragraph, parent, segment_implicit)
                }
                Block::Divider(divider) => self.write_divider(block, divider, parent),
                Block::Container(container) => {
                    self.write_container(block, container, parent, segment_implicit)?
                }
                Block::ListItem(item) => {
                    self.write_list_item(block, item, parent, segment_implicit)?
                }
                Block::Table(table) => self.write_table(block, table, parent, segment_implicit)?,
                Block::Entity(entity) => self.write_entity_block(block, entity, parent),
            }
        }
        self.close_lists_to(list_base);
        Ok(())
    }

    fn close_lists_to(&mut self, base: usize) {
        while self.list_stack.len() > base {
            self.list_stack.pop();
            self.ctx.list.close_level();
        }
    }

    fn write_paragraph(
        &mut self,
        block: &Block,
        paragraph: &Paragraph,
        parent: DomNodeId,
        segment_implicit: &Format,
    ) {
        if paragraph.is_implicit && paragraph.decorator.is_none() {
            self.write_segments(&paragraph.segments, parent, segment_implicit);
            return;
        }

        let tag = paragraph
            .decorator
            .as_ref()
            .map(|d| d.tag.clone())
            .unwrap_or_else(|| "div".to_string());
        let element = self.dom.create_tag(&tag);
        self.dom.append(parent, element);

        let tag_implicit = implicit_format(&tag);
        self.ctx.zero_unset_margins = true;
        self.apply(
            FormatScope::Block,
            &paragraph.format,
            element,
            tag_implicit.clone(),
        );
        self.ctx.zero_unset_margins = false;
        self.notify(CreatedNode::Block(block), element);

        let child_implicit = segment_implicit.extend(&tag_implicit.segment_subset());
        self.write_segments(&paragraph.segments, element, &child_implicit);
    }

    fn write_segments(&mut self, segments: &[Segment], parent: DomNodeId, implicit: &Format) {
        for segment in segments {
            match segment {
                Segment::Text(text) => self.write_text(segment, text, parent, implicit),
                Segment::Br(_) => {
                    let br = self.dom.create_tag("br");
                    self.dom.append(parent, br);
                    self.notify(CreatedNode::Segment(segment), br);
                }
                // Zero-width; callers restore carets through selection APIs,
                // not through emitted markup.
                Segment::SelectionMarker(_) => {}
                Segment::Image(image) => self.write_image(segment, image, parent, implicit),
                Segment::General(general) => self.write_general(segment, general, parent),
                Segment::Entity(entity) => {
                    self.dom.graft_html(parent, &entity.html);
                    let node = self.last_child(parent);
                    self.notify(CreatedNode::Segment(segment), node);
                }
            }
        }
    }

    fn write_text(
        &mut self,
        segment: &Segment,
        text: &Text,
        parent: DomNodeId,
        implicit: &Format,
    ) {
        let span = self.dom.create_tag("span");
        self.dom.append(parent, span);
        self.dom.append_text(span, &text.text);
        self.apply(FormatScope::Segment, &text.format, span, implicit.clone());
        self.notify(CreatedNode::Segment(segment), span);
        if self.has_no_attrs(span) {
            self.dom.unwrap(span);
        }
    }

    fn write_image(
        &mut self,
        segment: &Segment,
        image: &Image,
        parent: DomNodeId,
        implicit: &Format,
    ) {
        let img = self.dom.create_tag("img");
        self.dom.set_attr(img, "src", &image.src);
        if let Some(ref alt) = image.alt {
            self.dom.set_attr(img, "alt", alt);
        }
        if let Some(ref title) = image.title {
            self.dom.set_attr(img, "title", title);
        }
        self.dom.append(parent, img);

        self.apply(FormatScope::Segment, &image.format, img, implicit.clone());
        self.apply_keys(
            &[
                FormatKey::Id,
                FormatKey::Size,
                FormatKey::Margin,
                FormatKey::Padding,
            ],
            &image.format,
            img,
        );
        let entries: Vec<(String, String)> = image
            .dataset
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        for (name, value) in entries {
            self.dom.set_dataset(img, &name, &value);
        }
        self.notify(CreatedNode::Segment(segment), img);
    }

    fn write_general(&mut self, segment: &Segment, general: &GeneralSegment, parent: DomNodeId) {
        self.dom.graft_html(parent, &general.html);
        let node = self.last_child(parent);
        self.notify(CreatedNode::Segment(segment), node);
    }

    fn write_divider(&mut self, block: &Block, divider: &Divider, parent: DomNodeId) {
        let element = self.dom.create_tag(&divider.tag);
        self.dom.append(parent, element);
        self.apply(
            FormatScope::Block,
            &divider.format,
            element,
            implicit_format(&divider.tag),
        );
        self.notify(CreatedNode::Block(block), element);
    }

    fn write_container(
        &mut self,
        block: &Block,
        container: &FormatContainer,
        parent: DomNodeId,
        segment_implicit: &Format,
    ) -> Result<()> {
        let element = self.dom.create_tag(&container.tag);
        self.dom.append(parent, element);

        let tag_implicit = implicit_format(&container.tag);
        self.ctx.zero_unset_margins = true;
        self.apply(
            FormatScope::Block,
            &container.format,
            element,
            tag_implicit.clone(),
        );
        self.ctx.zero_unset_margins = false;
        self.notify(CreatedNode::Block(block), element);

        let child_implicit = segment_implicit.extend(&tag_implicit.segment_subset());
        self.write_blocks(&container.blocks, element, &child_implicit)
    }

    fn write_entity_block(&mut self, block: &Block, entity: &Entity, parent: DomNodeId) {
        self.dom.graft_html(parent, &entity.html);
        let node = self.last_child(parent);
        self.notify(CreatedNode::Block(block), node);
    }

    fn write_list_item(
        &mut self,
        block: &Block,
        item: &ListItem,
        parent: DomNodeId,
        segment_implicit: &Format,
    ) -> Result<()> {
        if item.levels.is_empty() {
            return Err(Error::InvalidModel(
                "list item with no list levels".to_string(),
            ));
        }
        self.sync_list_stack(item, parent);

        let (_, list_element) = *self
            .list_stack
            .last()
            .ok_or_else(|| Error::InvalidModel("no open list element".to_string()))?;
        let li = self.dom.create_tag("li");
        self.dom.append(list_element, li);

        let number = self.ctx.list.next_item();
        self.apply(FormatScope::ListItem, &item.format, li, Format::default());

        // Per-item marker templates come from the level metadata; an explicit
        // list-style-type on the item wins.
        if item.format.list_style_type.is_none()
            && let Some(level) = item.levels.last()
            && level.list_type == ListType::Ordered
            && let Some(metadata) = read_metadata::<ListMetadata>(&level.dataset)
            && let Some(style) = metadata.ordered_style()
        {
            let marker = style.marker();
            if marker.is_per_item() {
                let value = marker.css_value(number.max(1) as u32);
                self.dom.set_style(li, "list-style-type", &value);
            }
        }
        self.notify(CreatedNode::Block(block), li);

        self.write_blocks(&item.blocks, li, segment_implicit)
    }

    fn sync_list_stack(&mut self, item: &ListItem, parent: DomNodeId) {
        let mut common = 0;
        while common < self.list_stack.len()
            && common < item.levels.len()
            && self.list_stack[common].0 == item.levels[common].list_type
        {
            common += 1;
        }
        self.close_lists_to(common);

        for level in &item.levels[common..] {
            let attach = self
                .list_stack
                .last()
                .map(|(_, element)| *element)
                .unwrap_or(parent);
            let tag = level.list_type.tag();
            let element = self.dom.create_tag(tag);
            self.dom.append(attach, element);

            self.ctx.list.open_level();
            self.apply(
                FormatScope::ListLevel,
                &level.format,
                element,
                implicit_format(tag),
            );

            let entries: Vec<(String, String)> = level
                .dataset
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect();
            for (name, value) in entries {
                self.dom.set_dataset(element, &name, &value);
            }

            // Whole-list markers (keywords and fixed bullet literals) go on
            // the list element unless the level styles itself explicitly.
            if level.format.list_style_type.is_none()
                && let Some(metadata) = read_metadata::<ListMetadata>(&level.dataset)
            {
                let marker = match level.list_type {
                    ListType::Ordered => metadata.ordered_style().map(|s| s.marker()),
                    ListType::Unordered => metadata.unordered_style().map(|s| s.marker()),
                };
                if let Some(marker) = marker
                    && !marker.is_per_item()
                {
                    self.dom
                        .set_style(element, "list-style-type", &marker.css_value(1));
                }
            }

            self.notify(CreatedNode::ListLevel(level), element);
            self.list_stack.push((level.list_type, element));
        }
    }

    fn write_table(
        &mut self,
        block: &Block,
        table: &Table,
        parent: DomNodeId,
        segment_implicit: &Format,
    ) -> Result<()> {
        let columns = table.rows.first().map(|r| r.cells.len()).unwrap_or(0);
        if let Some(ragged) = table.rows.iter().find(|r| r.cells.len() != columns) {
            return Err(Error::InvalidTable(format!(
                "row with {} cells in a {columns}-column table",
                ragged.cells.len()
            )));
        }
        if !table.widths.is_empty() && table.widths.len() != columns {
            return Err(Error::InvalidTable(format!(
                "{} column widths for {columns} columns",
                table.widths.len()
            )));
        }

        let element = self.dom.create_tag("table");
        self.dom.append(parent, element);
        self.apply(
            FormatScope::Table,
            &table.format,
            element,
            Format::default(),
        );
        let entries: Vec<(String, String)> = table
            .dataset
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        for (name, value) in entries {
            self.dom.set_dataset(element, &name, &value);
        }
        self.notify(CreatedNode::Block(block), element);

        for (r, row) in table.rows.iter().enumerate() {
            let tr = self.dom.create_tag("tr");
            self.dom.append(element, tr);
            if row.height > 0.0 {
                self.dom.set_style(tr, "height", &format!("{}px", row.height));
            }
            self.apply(FormatScope::Block, &row.format, tr, Format::default());

            for (c, cell) in row.cells.iter().enumerate() {
                if cell.span_above || cell.span_left {
                    continue;
                }
                let tag = if cell.is_header { "th" } else { "td" };
                let td = self.dom.create_tag(tag);
                self.dom.append(tr, td);

                let colspan = span_right(table, r, c);
                let rowspan = span_below(table, r, c);
                if colspan > 1 {
                    self.dom.set_attr(td, "colspan", &colspan.to_string());
                }
                if rowspan > 1 {
                    self.dom.set_attr(td, "rowspan", &rowspan.to_string());
                }

                self.apply(
                    FormatScope::TableCell,
                    &cell.format,
                    td,
                    implicit_format(tag),
                );
                let entries: Vec<(String, String)> = cell
                    .dataset
                    .iter()
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect();
                for (name, value) in entries {
                    self.dom.set_dataset(td, &name, &value);
                }
                self.notify(CreatedNode::TableCell(cell), td);

                let child_implicit =
                    segment_implicit.extend(&implicit_format(tag).segment_subset());
                self.write_blocks(&cell.blocks, td, &child_implicit)?;
            }
        }
        Ok(())
    }

    fn has_no_attrs(&self, node: DomNodeId) -> bool {
        match self.dom.get(node).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs.is_empty(),
            _ => false,
        }
    }

    fn last_child(&self, parent: DomNodeId) -> DomNodeId {
        self.dom
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE)
    }
}

fn span_right(table: &Table, row: usize, column: usize) -> usize {
    let cells = &table.rows[row].cells;
    let mut span = 1;
    while column + span < cells.len()
        && cells[column + span].span_left
        && !cells[column + span].span_above
    {
        span += 1;
    }
    span
}

fn span_below(table: &Table, row: usize, column: usize) -> usize {
    let mut span = 1;
    while row + span < table.rows.len() {
        let cell = &table.rows[row + span].cells[column];
        if cell.span_above && !cell.span_left {
            span += 1;
        } else {
            break;
        }
    }
    span
}
