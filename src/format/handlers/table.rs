//! Table spacing handler: border-collapse, border-spacing and box-sizing.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{ToCss, parse_length};
use super::super::element::StyledElement;
use super::super::parts::Format;

pub fn parse_table_spacing(
    format: &mut Format,
    element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
    match element.style("border-collapse") {
        Some("collapse") => format.border_collapse = Some(true),
        Some("separate") => format.border_collapse = Some(false),
        _ => {}
    }
    if let Some(spacing) = element.style("border-spacing").and_then(parse_length) {
        format.border_spacing = Some(spacing);
    }
    if element.style("box-sizing") == Some("border-box") {
        format.use_border_box = Some(true);
    }
}

pub fn apply_table_spacing(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    _ctx: &mut ApplyContext,
) {
    match format.border_collapse {
        Some(true) => dom.set_style(node, "border-collapse", "collapse"),
        Some(false) => dom.set_style(node, "border-collapse", "separate"),
        None => {}
    }
    if let Some(spacing) = format.border_spacing {
        dom.set_style(node, "border-spacing", &spacing.to_css_string());
    }
    if format.use_border_box == Some(true) {
        dom.set_style(node, "box-sizing", "border-box");
    }
}
