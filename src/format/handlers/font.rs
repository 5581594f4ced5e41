//! Font family, size and color handlers.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{ToCss, parse_color, parse_length};
use super::super::element::StyledElement;
use super::super::parts::Format;

pub fn parse_font_family(
    format: &mut Format,
    element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
    let value = element.style("font-family").or_else(|| element.attr("face"));
    if let Some(family) = value {
        format.font_family = Some(family.to_string());
    }
}

pub fn apply_font_family(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(ref family) = format.font_family
        && ctx.implicit.font_family.as_deref() != Some(family.as_str())
    {
        dom.set_style(node, "font-family", family);
    }
}

pub fn parse_font_size(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(size) = element.style("font-size").and_then(parse_length) {
        format.font_size = Some(size);
    }
}

pub fn apply_font_size(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(size) = format.font_size
        && ctx.implicit.font_size != Some(size)
    {
        dom.set_style(node, "font-size", &size.to_css_string());
    }
}

pub fn parse_text_color(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    let value = element.style("color").or_else(|| element.attr("color"));
    if let Some(color) = value.and_then(parse_color) {
        format.text_color = Some(color);
    }
}

pub fn apply_text_color(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(color) = format.text_color
        && ctx.implicit.text_color != Some(color)
    {
        dom.set_style(node, "color", &color.to_css_string());
    }
}

pub fn parse_background_color(
    format: &mut Format,
    element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
    // `background` is only honored when it is a plain color.
    let value = element
        .style("background-color")
        .or_else(|| element.style("background"))
        .or_else(|| element.attr("bgcolor"));
    if let Some(color) = value.and_then(parse_color) {
        format.background_color = Some(color);
    }
}

pub fn apply_background_color(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(color) = format.background_color
        && ctx.implicit.background_color != Some(color)
    {
        dom.set_style(node, "background-color", &color.to_css_string());
    }
}
