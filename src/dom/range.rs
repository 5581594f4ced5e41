//! DOM positions and ranges used to mark selection during conversion.
//!
//! A position addresses either a character offset inside a text node or a
//! child index inside an element, matching the browser Range addressing the
//! host hands to the conversion.

use super::arena::DomNodeId;

/// A position inside the DOM tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomPosition {
    /// The container node (text node or element).
    pub node: DomNodeId,
    /// Character offset for text nodes, child index for elements.
    pub offset: usize,
}

impl DomPosition {
    pub fn new(node: DomNodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A selection range over the DOM tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: DomPosition,
    pub end: DomPosition,
}

impl DomRange {
    pub fn new(start: DomPosition, end: DomPosition) -> Self {
        Self { start, end }
    }

    /// A collapsed range (caret) at a single position.
    pub fn collapsed(at: DomPosition) -> Self {
        Self {
            start: at,
            end: at,
        }
    }

    /// Whether the range is collapsed to a caret.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}
