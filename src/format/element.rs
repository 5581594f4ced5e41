//! Read-side view of an element for format parsers.
//!
//! Combines the tag's declarative default styles with the element's inline
//! style, in cascade order, so parsers observe effective values the way a
//! browser's computed style would report them for these properties.

use crate::dom::{DomNodeId, DomTree};

use super::defaults::default_style;

pub struct StyledElement<'a> {
    dom: &'a DomTree,
    id: DomNodeId,
    tag: String,
    styles: Vec<(String, String)>,
}

impl<'a> StyledElement<'a> {
    /// Wrap an element node. Returns `None` for non-element nodes.
    pub fn new(dom: &'a DomTree, id: DomNodeId) -> Option<Self> {
        let tag = dom.element_name(id)?.to_string();
        let mut styles: Vec<(String, String)> = default_style(&tag)
            .iter()
            .map(|(p, v)| ((*p).to_string(), (*v).to_string()))
            .collect();
        styles.extend(dom.style_entries(id));
        Some(Self { dom, id, tag, styles })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn node(&self) -> DomNodeId {
        self.id
    }

    pub fn dom(&self) -> &DomTree {
        self.dom
    }

    /// Effective value of a style property, last declaration wins.
    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .rev()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// All style declarations in cascade order (defaults first, then inline).
    ///
    /// Shorthand-aware parsers iterate this instead of calling [`style`] so
    /// that `margin: 0; margin-top: 1em` resolves in declaration order.
    ///
    /// [`style`]: Self::style
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.dom.get_attr(self.id, name)
    }

    /// The parent element, if any.
    pub fn parent(&self) -> Option<StyledElement<'a>> {
        let parent = self.dom.get(self.id)?.parent;
        StyledElement::new(self.dom, parent)
    }
}
