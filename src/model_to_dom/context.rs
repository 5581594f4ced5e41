//! Options and callback types for the model-to-DOM walk.

use crate::dom::DomNodeId;
use crate::format::FormatRegistry;
use crate::model::{Block, ListLevel, Segment, TableCell};

#[derive(Default)]
pub struct ModelToDomOptions {
    pub registry: FormatRegistry,
    /// Ratio to re-apply to intrinsic pixel sizes on write.
    pub zoom_scale: Option<f32>,
}

/// A model node the writer just materialized, paired with its DOM node in
/// the [`on_node_created`] callback.
///
/// [`on_node_created`]: super::writer::ModelWriter
#[derive(Debug, Clone, Copy)]
pub enum CreatedNode<'a> {
    Block(&'a Block),
    Segment(&'a Segment),
    TableCell(&'a TableCell),
    ListLevel(&'a ListLevel),
}

/// Callback invoked for every materialized node.
pub type OnNodeCreated<'cb> = dyn FnMut(CreatedNode<'_>, DomNodeId) + 'cb;
