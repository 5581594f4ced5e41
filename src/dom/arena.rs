//! Arena-based DOM tree.
//!
//! Both conversion directions operate on this tree: html5ever parses input
//! HTML into it, and the model writer materializes elements back into it.
//! All nodes live in a contiguous vector; parent/child/sibling links are
//! indices into that vector.

use std::collections::HashMap;

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomNodeId(pub u32);

impl DomNodeId {
    /// Sentinel value for no node.
    pub const NONE: DomNodeId = DomNodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload in the DOM tree.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Text content.
    Text(String),
    /// Comment (kept for TreeSink completeness, ignored by conversion).
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the DOM tree.
#[derive(Debug)]
pub struct DomNode {
    pub data: NodeData,
    pub parent: DomNodeId,
    pub first_child: DomNodeId,
    pub last_child: DomNodeId,
    pub prev_sibling: DomNodeId,
    pub next_sibling: DomNodeId,
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: DomNodeId::NONE,
            first_child: DomNodeId::NONE,
            last_child: DomNodeId::NONE,
            prev_sibling: DomNodeId::NONE,
            next_sibling: DomNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
pub struct DomTree {
    nodes: Vec<DomNode>,
    document: DomNodeId,
    id_map: HashMap<String, DomNodeId>,
}

impl DomTree {
    /// Create a new empty tree with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: DomNodeId::NONE,
            id_map: HashMap::new(),
        };
        dom.document = dom.alloc(DomNode::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: DomNode) -> DomNodeId {
        let id = DomNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> DomNodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: DomNodeId) -> Option<&DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: DomNodeId) -> Option<&mut DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node with attributes.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> DomNodeId {
        let id_attr = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "id")
            .map(|a| a.value.clone());

        let node_id = self.alloc(DomNode::new(NodeData::Element { name, attrs }));

        if let Some(id_str) = id_attr {
            self.id_map.insert(id_str, node_id);
        }

        node_id
    }

    /// Create an element by tag name with no attributes.
    pub fn create_tag(&mut self, tag: &str) -> DomNodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        self.create_element(name, Vec::new())
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> DomNodeId {
        self.alloc(DomNode::new(NodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> DomNodeId {
        self.alloc(DomNode::new(NodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> DomNodeId {
        self.alloc(DomNode::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: DomNodeId, child: DomNodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: DomNodeId, new_node: DomNodeId) {
        let parent = self
            .get(sibling)
            .map(|n| n.parent)
            .unwrap_or(DomNodeId::NONE);
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(DomNodeId::NONE);

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: DomNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Get node by id attribute.
    pub fn get_by_id(&self, id: &str) -> Option<DomNodeId> {
        self.id_map.get(id).copied()
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: DomNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(DomNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Find the first node matching a predicate (DFS).
    pub fn find<F>(&self, predicate: F) -> Option<DomNodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if predicate(node) {
                    return Some(id);
                }
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<DomNodeId> {
        self.find(|node| {
            if let NodeData::Element { name, .. } = &node.data {
                name.local.as_ref() == tag
            } else {
                false
            }
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a DomTree,
    current: DomNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = DomNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(DomNodeId::NONE);
        Some(id)
    }
}

/// Element accessors.
impl DomTree {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: DomNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: DomNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Set an attribute value, replacing any existing value.
    pub fn set_attr(&mut self, id: DomNodeId, attr_name: &str, value: &str) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, .. } = &mut node.data
        {
            if let Some(attr) = attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
                attr.value = value.to_string();
                return;
            }
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: value.to_string(),
            });
        }
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: DomNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: DomNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: DomNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

/// Editing helpers used by the format appliers and the model writer.
impl DomTree {
    /// Parsed inline style declarations of an element, in source order.
    ///
    /// Values keep their raw string form; the format parsers tokenize them
    /// with cssparser as needed.
    pub fn style_entries(&self, id: DomNodeId) -> Vec<(String, String)> {
        let Some(style) = self.get_attr(id, "style") else {
            return Vec::new();
        };
        style
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim().to_ascii_lowercase();
                let value = value.trim().to_string();
                if prop.is_empty() || value.is_empty() {
                    None
                } else {
                    Some((prop, value))
                }
            })
            .collect()
    }

    /// Append one inline style declaration to an element.
    pub fn set_style(&mut self, id: DomNodeId, prop: &str, value: &str) {
        let mut style = self.get_attr(id, "style").unwrap_or("").to_string();
        if !style.is_empty() && !style.ends_with(';') {
            style.push(';');
        }
        style.push_str(prop);
        style.push_str(": ");
        style.push_str(value);
        self.set_attr(id, "style", &style);
    }

    /// Get a `data-*` attribute (name given without the prefix).
    pub fn get_dataset(&self, id: DomNodeId, name: &str) -> Option<&str> {
        let full = format!("data-{name}");
        self.get_attr(id, &full)
    }

    /// Set a `data-*` attribute (name given without the prefix).
    pub fn set_dataset(&mut self, id: DomNodeId, name: &str, value: &str) {
        let full = format!("data-{name}");
        self.set_attr(id, &full, value);
    }

    /// Move all children of `node` into a freshly created element with the
    /// given tag, then append that element as the sole child of `node`.
    ///
    /// This is the tag-wrapping side effect of appliers like bold/italic:
    /// `<span>abc</span>` becomes `<span><b>abc</b></span>`.
    pub fn wrap_children(&mut self, node: DomNodeId, tag: &str) -> DomNodeId {
        let wrapper = self.create_tag(tag);
        let children: Vec<_> = self.children(node).collect();

        for child in &children {
            if let Some(c) = self.get_mut(*child) {
                c.parent = DomNodeId::NONE;
                c.prev_sibling = DomNodeId::NONE;
                c.next_sibling = DomNodeId::NONE;
            }
        }
        if let Some(n) = self.get_mut(node) {
            n.first_child = DomNodeId::NONE;
            n.last_child = DomNodeId::NONE;
        }

        for child in children {
            self.append(wrapper, child);
        }
        self.append(node, wrapper);
        wrapper
    }

    /// Detach a node from its parent. The node stays allocated in the arena
    /// but is no longer reachable from the document.
    pub fn detach(&mut self, node: DomNodeId) {
        let Some(n) = self.get(node) else {
            return;
        };
        let (parent, prev, next) = (n.parent, n.prev_sibling, n.next_sibling);

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }
        if next.is_some() {
            if let Some(nx) = self.get_mut(next) {
                nx.prev_sibling = prev;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }

        if let Some(n) = self.get_mut(node) {
            n.parent = DomNodeId::NONE;
            n.prev_sibling = DomNodeId::NONE;
            n.next_sibling = DomNodeId::NONE;
        }
    }

    /// Replace a node with its own children, in place.
    pub fn unwrap(&mut self, node: DomNodeId) {
        let children: Vec<_> = self.children(node).collect();
        for child in children {
            self.detach(child);
            self.insert_before(node, child);
        }
        self.detach(node);
    }

    /// Deep-copy a subtree from another tree under `parent`.
    pub fn graft(&mut self, parent: DomNodeId, other: &DomTree, other_node: DomNodeId) {
        let Some(node) = other.get(other_node) else {
            return;
        };
        let copy = match &node.data {
            NodeData::Element { name, attrs } => self.create_element(name.clone(), attrs.clone()),
            NodeData::Text(s) => self.create_text(s.clone()),
            NodeData::Comment(s) => self.create_comment(s.clone()),
            NodeData::Document | NodeData::Doctype { .. } => return,
        };
        self.append(parent, copy);
        for child in other.children(other_node) {
            self.graft(copy, other, child);
        }
    }

    /// Parse an HTML fragment and graft its body content under `parent`.
    pub fn graft_html(&mut self, parent: DomNodeId, html: &str) {
        let fragment = super::parse_html(html);
        if let Some(body) = fragment.find_by_tag("body") {
            for child in fragment.children(body) {
                self.graft(parent, &fragment, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    #[test]
    fn test_create_elements() {
        let mut dom = DomTree::new();

        let div = dom.create_element(
            make_qname("div"),
            vec![Attribute {
                name: make_qname("id"),
                value: "main".to_string(),
            }],
        );

        dom.append(dom.document(), div);

        assert_eq!(dom.element_name(div).unwrap().as_ref(), "div");
        assert_eq!(dom.get_attr(div, "id"), Some("main"));
        assert_eq!(dom.get_by_id("main"), Some(div));
    }

    #[test]
    fn test_append_children() {
        let mut dom = DomTree::new();

        let parent = dom.create_tag("div");
        let child1 = dom.create_tag("p");
        let child2 = dom.create_tag("p");

        dom.append(dom.document(), parent);
        dom.append(parent, child1);
        dom.append(parent, child2);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![child1, child2]);
    }

    #[test]
    fn test_text_merging() {
        let mut dom = DomTree::new();

        let p = dom.create_tag("p");
        dom.append(dom.document(), p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_style_entries() {
        let mut dom = DomTree::new();
        let div = dom.create_tag("div");
        dom.append(dom.document(), div);

        dom.set_style(div, "margin-top", "1em");
        dom.set_style(div, "text-align", "center");

        let entries = dom.style_entries(div);
        assert_eq!(
            entries,
            vec![
                ("margin-top".to_string(), "1em".to_string()),
                ("text-align".to_string(), "center".to_string()),
            ]
        );
    }

    #[test]
    fn test_unwrap() {
        let mut dom = DomTree::new();
        let div = dom.create_tag("div");
        let span = dom.create_tag("span");
        dom.append(dom.document(), div);
        dom.append(div, span);
        dom.append_text(span, "a");
        let tail = dom.create_text("b".to_string());
        dom.append(div, tail);

        dom.unwrap(span);

        let children: Vec<_> = dom.children(div).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(dom.text_content(children[0]), Some("a"));
        assert_eq!(dom.text_content(children[1]), Some("b"));
    }

    #[test]
    fn test_wrap_children() {
        let mut dom = DomTree::new();
        let span = dom.create_tag("span");
        dom.append(dom.document(), span);
        dom.append_text(span, "abc");

        let b = dom.wrap_children(span, "b");

        let children: Vec<_> = dom.children(span).collect();
        assert_eq!(children, vec![b]);
        let inner: Vec<_> = dom.children(b).collect();
        assert_eq!(dom.text_content(inner[0]), Some("abc"));
    }
}
