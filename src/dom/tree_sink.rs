//! html5ever tree-builder sink feeding the arena.
//!
//! The builder drives this sink through `&self` callbacks, so the tree
//! under construction sits behind a `RefCell`. Element handles carry their
//! own qualified name, which lets `elem_name` answer without borrowing out
//! of the cell.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as TokenAttribute, QualName};

use super::arena::{Attribute, DomNodeId, DomTree, NodeData};

/// Builder-side reference to an arena node.
#[derive(Debug, Clone)]
pub struct SinkHandle {
    id: DomNodeId,
    name: Option<QualName>,
}

impl SinkHandle {
    fn node(id: DomNodeId) -> Self {
        SinkHandle { id, name: None }
    }

    fn element(id: DomNodeId, name: QualName) -> Self {
        SinkHandle {
            id,
            name: Some(name),
        }
    }
}

/// Sink that assembles a [`DomTree`] while html5ever parses.
pub struct DomSink {
    dom: RefCell<DomTree>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(DomTree::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the finished tree.
    pub fn into_dom(self) -> DomTree {
        self.dom.into_inner()
    }

    fn convert_attrs(attrs: Vec<TokenAttribute>) -> Vec<Attribute> {
        attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect()
    }

    fn insert(&self, parent: DomNodeId, child: NodeOrText<SinkHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                dom.append(parent, node.id);
            }
            // append_text merges into a trailing text node, so split
            // character runs arrive as one segment-sized text node.
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for DomSink {
    type Handle = SinkHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    // Input reaches this crate already sanitized; recoverable parse errors
    // carry nothing the model layer uses.
    fn parse_error(&self, _msg: Cow<'static, str>) {}

    fn get_document(&self) -> Self::Handle {
        SinkHandle::node(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };
        target.name.as_ref().unwrap_or(&EMPTY)
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<TokenAttribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let id = self
            .dom
            .borrow_mut()
            .create_element(name.clone(), Self::convert_attrs(attrs));
        SinkHandle::element(id, name)
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        SinkHandle::node(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    // Processing instructions carry no editing content; an empty comment
    // keeps the handle valid.
    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        SinkHandle::node(self.dom.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.id, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.dom.borrow().get(element.id).map(|n| n.parent);
        match parent {
            Some(parent) if parent.is_some() => self.insert(parent, child),
            _ => self.insert(prev_element.id, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let document = dom.document();
        let doctype = dom.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        dom.append(document, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => {
                dom.insert_before(sibling.id, node.id);
            }
            NodeOrText::AppendText(text) => {
                let text_node = dom.create_text(text.to_string());
                dom.insert_before(sibling.id, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<TokenAttribute>) {
        let mut dom = self.dom.borrow_mut();
        let Some(NodeData::Element {
            attrs: existing, ..
        }) = dom.get_mut(target.id).map(|n| &mut n.data)
        else {
            return;
        };
        for attr in Self::convert_attrs(attrs) {
            if !existing.iter().any(|a| a.name == attr.name) {
                existing.push(attr);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.id);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children: Vec<_> = self.dom.borrow().children(node.id).collect();
        let mut dom = self.dom.borrow_mut();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.id, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_fragment;

    #[test]
    fn test_editing_attributes_survive_parsing() {
        let (dom, body) = parse_fragment(
            r#"<ol data-editing-info='{"orderedStyleType":3}' style="margin-top: 0px"><li>a</li></ol>"#,
        );

        let ol = dom.find_by_tag("ol").expect("should find ol");
        assert!(dom.children(body).any(|c| c == ol));
        assert_eq!(
            dom.get_dataset(ol, "editing-info"),
            Some(r#"{"orderedStyleType":3}"#)
        );
        assert_eq!(dom.style_entries(ol), vec![("margin-top".to_string(), "0px".to_string())]);
    }

    #[test]
    fn test_split_character_runs_merge() {
        // The tokenizer may hand text over in several chunks; the arena
        // sees one text node per run.
        let (dom, body) = parse_fragment("plain &amp; escaped");
        let children: Vec<_> = dom.children(body).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("plain & escaped"));
    }

    #[test]
    fn test_misnested_tags_recover() {
        let (dom, _) = parse_fragment("<b>one<i>two</b>three</i>");
        let b = dom.find_by_tag("b").expect("should find b");
        assert_eq!(dom.element_name(b).unwrap().as_ref(), "b");
        // Adoption moves nodes between parents; links must stay coherent.
        let i = dom.find_by_tag("i").expect("should find i");
        assert!(dom.children(i).next().is_some());
    }
}
