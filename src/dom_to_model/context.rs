//! Options and conversion context for the DOM-to-model walk.

use std::collections::HashMap;

use crate::dom::{DomNodeId, DomRange};
use crate::format::{Format, FormatRegistry, ParseContext};
use crate::model::{Block, ListLevel};

use super::builder::ModelBuilder;

/// Replaces the built-in processor for one element category.
pub type ElementProcessor = fn(&mut ModelBuilder<'_>, DomNodeId, &mut BlockSink<'_>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorKey {
    Table,
    List,
    Image,
    Divider,
}

#[derive(Default)]
pub struct ProcessorOverrides {
    map: HashMap<ProcessorKey, ElementProcessor>,
}

impl ProcessorOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: ProcessorKey, processor: ElementProcessor) -> Self {
        self.map.insert(key, processor);
        self
    }

    pub fn get(&self, key: ProcessorKey) -> Option<ElementProcessor> {
        self.map.get(&key).copied()
    }
}

#[derive(Default)]
pub struct DomToModelOptions {
    pub registry: FormatRegistry,
    pub processors: ProcessorOverrides,
    /// Ratio between rendered and intrinsic size of the source DOM.
    pub zoom_scale: Option<f32>,
    /// Selection range to mark while converting.
    pub selection: Option<DomRange>,
}

/// Mutable walk state. One context lives for the duration of a conversion;
/// inherited values (segment format, list level chain) are saved and
/// restored around each descent instead of being shared between siblings.
pub struct DomToModelContext {
    pub parse: ParseContext,
    /// Inline format inherited from ancestor elements.
    pub segment_format: Format,
    /// List level chain of the lists currently open above the walk position.
    pub levels: Vec<ListLevel>,
    pub selection: Option<DomRange>,
    pub in_selection: bool,
}

impl DomToModelContext {
    pub fn new(options: &DomToModelOptions) -> Self {
        let mut parse = ParseContext::default();
        if let Some(zoom) = options.zoom_scale {
            parse.zoom_scale = zoom;
        }
        Self {
            parse,
            segment_format: Format::default(),
            levels: Vec::new(),
            selection: options.selection.clone(),
            in_selection: false,
        }
    }
}

/// Accumulates blocks while walking, holding the paragraph currently being
/// filled so loose inline content lands in one implicit paragraph instead
/// of one per node.
pub struct BlockSink<'b> {
    blocks: &'b mut Vec<Block>,
    current: Option<crate::model::Paragraph>,
}

impl<'b> BlockSink<'b> {
    pub fn new(blocks: &'b mut Vec<Block>) -> Self {
        Self {
            blocks,
            current: None,
        }
    }

    /// Begin filling an explicit paragraph. Any pending paragraph is closed
    /// first.
    pub fn open_paragraph(&mut self, paragraph: crate::model::Paragraph) {
        self.close_paragraph();
        self.current = Some(paragraph);
    }

    /// The paragraph currently being filled, creating an implicit one if
    /// nothing is open.
    pub fn paragraph(&mut self) -> &mut crate::model::Paragraph {
        self.current
            .get_or_insert_with(crate::model::Paragraph::implicit)
    }

    /// Close the pending paragraph. Implicit paragraphs that stayed empty
    /// are dropped.
    pub fn close_paragraph(&mut self) {
        if let Some(paragraph) = self.current.take()
            && (!paragraph.is_implicit || !paragraph.segments.is_empty())
        {
            self.blocks.push(Block::Paragraph(paragraph));
        }
    }

    /// Push a completed block, closing any pending paragraph first.
    pub fn push_block(&mut self, block: Block) {
        self.close_paragraph();
        self.blocks.push(block);
    }
}
