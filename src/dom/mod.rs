//! Arena DOM, HTML parsing and serialization.

pub mod arena;
pub mod range;
pub mod serialize;
pub mod tree_sink;

pub use arena::{Attribute, DomNode, DomNodeId, DomTree, NodeData};
pub use range::{DomPosition, DomRange};
pub use serialize::{serialize_children, serialize_node};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse an HTML document into a DomTree.
pub fn parse_html(html: &str) -> DomTree {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}

/// Parse an HTML fragment by wrapping it in a minimal document.
///
/// Returns the tree together with the body node holding the fragment content.
pub fn parse_fragment(html: &str) -> (DomTree, DomNodeId) {
    let dom = parse_html(html);
    let body = dom.find_by_tag("body").unwrap_or(dom.document());
    (dom, body)
}
