//! Size and id handlers.
//!
//! Sizes are stored at intrinsic scale: pixel values are divided by the
//! zoom scale on parse and multiplied back on apply, so a model built from
//! a zoomed editor round-trips through an unzoomed one unchanged.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{CssLength, ToCss, parse_length};
use super::super::element::StyledElement;
use super::super::parts::Format;

fn unzoom(length: CssLength, scale: f32) -> CssLength {
    match length {
        CssLength::Px(v) if scale != 1.0 && scale > 0.0 => CssLength::Px(v / scale),
        other => other,
    }
}

fn rezoom(length: CssLength, scale: f32) -> CssLength {
    match length {
        CssLength::Px(v) if scale != 1.0 => CssLength::Px(v * scale),
        other => other,
    }
}

fn parse_dimension(element: &StyledElement<'_>, prop: &str) -> Option<CssLength> {
    if let Some(length) = element.style(prop).and_then(parse_length) {
        return Some(length);
    }
    // Presentational width/height attributes are bare pixel counts.
    let attr = element.attr(prop)?;
    attr.trim().parse::<f32>().ok().map(CssLength::Px)
}

pub fn parse_size(format: &mut Format, element: &StyledElement<'_>, ctx: &mut ParseContext) {
    if let Some(width) = parse_dimension(element, "width") {
        format.width = Some(unzoom(width, ctx.zoom_scale));
    }
    if let Some(height) = parse_dimension(element, "height") {
        format.height = Some(unzoom(height, ctx.zoom_scale));
    }
}

pub fn apply_size(format: &Format, node: DomNodeId, dom: &mut DomTree, ctx: &mut ApplyContext) {
    if let Some(width) = format.width {
        dom.set_style(node, "width", &rezoom(width, ctx.zoom_scale).to_css_string());
    }
    if let Some(height) = format.height {
        dom.set_style(node, "height", &rezoom(height, ctx.zoom_scale).to_css_string());
    }
}

pub fn parse_id(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(id) = element.attr("id") {
        format.id = Some(id.to_string());
    }
}

pub fn apply_id(format: &Format, node: DomNodeId, dom: &mut DomTree, _ctx: &mut ApplyContext) {
    if let Some(ref id) = format.id {
        dom.set_attr(node, "id", id);
    }
}
