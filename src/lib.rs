//! Bidirectional conversion between HTML and a structured content model.
//!
//! The content model is a normalized tree of blocks and segments carrying
//! plain format records. HTML is parsed into it through per-concern format
//! handlers, edited as data, and written back out as minimal inline-styled
//! markup. The same handler table drives both directions, which is what
//! keeps round-trips stable.
//!
//! ```no_run
//! use velum::{DomToModelOptions, ModelToDomOptions, create_model_from_html, model_to_html};
//!
//! let model = create_model_from_html("<b>hello</b>", &DomToModelOptions::default());
//! let html = model_to_html(&model, &ModelToDomOptions::default())?;
//! # Ok::<(), velum::Error>(())
//! ```

pub mod dom;
pub mod dom_to_model;
pub mod error;
pub mod format;
pub mod metadata;
pub mod model;
pub mod model_to_dom;
pub mod selection;

pub use dom::{DomPosition, DomRange, DomTree, parse_fragment, parse_html};
pub use dom_to_model::{DomToModelOptions, ProcessorKey, ProcessorOverrides, dom_to_model};
pub use error::{Error, Result};
pub use format::{Format, FormatHandler, FormatKey, FormatRegistry, FormatScope};
pub use metadata::{ListMetadata, TableMetadata, read_metadata, write_metadata};
pub use model::{Block, ContentModelDocument, Paragraph, Segment};
pub use model_to_dom::{CreatedNode, ModelToDomOptions, model_to_dom, model_to_dom_with_callback};
pub use selection::adjust_image_selection;

/// Parse an HTML fragment into a content model.
pub fn create_model_from_html(html: &str, options: &DomToModelOptions) -> ContentModelDocument {
    let (dom, body) = dom::parse_fragment(html);
    dom_to_model::dom_to_model(&dom, body, options)
}

/// Write a content model back out as an HTML fragment.
pub fn model_to_html(model: &ContentModelDocument, options: &ModelToDomOptions) -> Result<String> {
    let (dom, root) = model_to_dom::model_to_dom(model, options)?;
    Ok(dom::serialize_children(&dom, root))
}
