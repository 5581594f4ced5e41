//! DOM tree serialization back to an HTML string.
//!
//! Walks the tree and emits tags by string building. Attribute order is the
//! insertion order in the arena, so a parse/serialize cycle over markup this
//! crate produced is byte-stable.

use std::fmt::Write;

use super::arena::{DomNodeId, DomTree, NodeData};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize the children of a node as an HTML fragment.
pub fn serialize_children(dom: &DomTree, parent: DomNodeId) -> String {
    let mut out = String::new();
    for child in dom.children(parent) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Serialize a node and its subtree.
pub fn serialize_node(dom: &DomTree, id: DomNodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

fn write_node(dom: &DomTree, id: DomNodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeData::Text(text) => {
            out.push_str(&escape_text(text));
        }
        NodeData::Comment(_) | NodeData::Doctype { .. } => {}
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                write!(
                    out,
                    " {}=\"{}\"",
                    attr.name.local.as_ref(),
                    escape_attr(&attr.value)
                )
                .unwrap();
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            for child in dom.children(id) {
                write_node(dom, child, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_simple() {
        let mut dom = DomTree::new();
        let p = dom.create_tag("p");
        dom.append(dom.document(), p);
        dom.append_text(p, "a < b & c");

        assert_eq!(serialize_node(&dom, p), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_serialize_attrs_and_void() {
        let mut dom = DomTree::new();
        let img = dom.create_tag("img");
        dom.set_attr(img, "src", "x.png");
        dom.set_attr(img, "alt", "a \"b\"");
        dom.append(dom.document(), img);

        assert_eq!(
            serialize_node(&dom, img),
            r#"<img src="x.png" alt="a &quot;b&quot;">"#
        );
    }

    #[test]
    fn test_parse_serialize_stable() {
        let html = r#"<div style="margin: 1em"><b>bold</b> text</div>"#;
        let dom = super::super::parse_html(html);
        let body = dom.find_by_tag("body").unwrap();
        assert_eq!(serialize_children(&dom, body), html);
    }
}
