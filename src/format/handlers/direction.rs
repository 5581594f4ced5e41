//! Direction and alignment handlers.
//!
//! Alignment is stored logically (start/center/end) relative to the node's
//! direction; both the parser and the applier go through the shared
//! logical⟷physical table so the mapping cannot drift between directions.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{
    Direction, PhysicalAlign, TextAlign, ToCss, logical_align, physical_align,
};
use super::super::element::StyledElement;
use super::super::parts::Format;

pub fn parse_direction(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    let value = element.style("direction").or_else(|| element.attr("dir"));
    match value {
        Some("rtl") => format.direction = Some(Direction::Rtl),
        Some("ltr") => format.direction = Some(Direction::Ltr),
        _ => {}
    }
}

pub fn apply_direction(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(direction) = format.direction
        && ctx.implicit.direction != Some(direction)
    {
        let value = match direction {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        };
        dom.set_style(node, "direction", value);
    }
}

fn physical_from_keyword(value: &str) -> Option<PhysicalAlign> {
    match value {
        "left" => Some(PhysicalAlign::Left),
        "center" => Some(PhysicalAlign::Center),
        "right" => Some(PhysicalAlign::Right),
        _ => None,
    }
}

fn logical_from_value(value: &str, direction: Direction) -> Option<TextAlign> {
    match value {
        "start" => Some(TextAlign::Start),
        "end" => Some(TextAlign::End),
        _ => physical_from_keyword(value).map(|p| logical_align(p, direction)),
    }
}

pub fn parse_text_align(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.style("text-align") {
        let direction = format.direction.unwrap_or_default();
        if let Some(align) = logical_from_value(value, direction) {
            format.text_align = Some(align);
        }
    }
}

pub fn apply_text_align(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    // The align attribute wins over text-align, so its handler owns the
    // output when both are set.
    if format.html_align.is_some() {
        return;
    }
    if let Some(align) = format.text_align
        && ctx.implicit.text_align != Some(align)
    {
        let direction = format.direction.unwrap_or_default();
        let physical = physical_align(align, direction);
        dom.set_style(node, "text-align", &physical.to_css_string());
    }
}

pub fn parse_html_align(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.attr("align") {
        let direction = format.direction.unwrap_or_default();
        if let Some(align) = logical_from_value(&value.to_ascii_lowercase(), direction) {
            // The attribute wins; the model carries one alignment source.
            format.html_align = Some(align);
            format.text_align = None;
        }
    }
}

pub fn apply_html_align(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    _ctx: &mut ApplyContext,
) {
    if let Some(align) = format.html_align {
        let direction = format.direction.unwrap_or_default();
        let physical = physical_align(align, direction);
        dom.set_attr(node, "align", &physical.to_css_string());
    }
}

/// Alignment of a single list item, carried by `align-self` under a flex
/// column list. Parsed only when the parent list actually is such a column.
pub fn parse_list_item_align(
    format: &mut Format,
    element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
    let Some(parent) = element.parent() else {
        return;
    };
    if parent.style("display") != Some("flex")
        || parent.style("flex-direction") != Some("column")
    {
        return;
    }
    let align = match element.style("align-self") {
        Some("flex-start") => TextAlign::Start,
        Some("center") => TextAlign::Center,
        Some("flex-end") => TextAlign::End,
        _ => return,
    };
    format.text_align = Some(align);
}

pub fn apply_list_item_align(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    _ctx: &mut ApplyContext,
) {
    let Some(align) = format.text_align else {
        return;
    };
    let value = match align {
        TextAlign::Start => "flex-start",
        TextAlign::Center => "center",
        TextAlign::End => "flex-end",
    };
    let parent = dom.get(node).map(|n| n.parent).unwrap_or(DomNodeId::NONE);
    if parent.is_some() {
        let styles = dom.style_entries(parent);
        if !styles.iter().any(|(p, _)| p == "display") {
            dom.set_style(parent, "display", "flex");
            dom.set_style(parent, "flex-direction", "column");
        }
    }
    dom.set_style(node, "align-self", value);
}
