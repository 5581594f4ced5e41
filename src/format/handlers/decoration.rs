//! Text decoration handlers: bold, italic, underline, strikethrough,
//! super/subscript, line height and whitespace.
//!
//! The boolean decorations apply by wrapping the node's children in the
//! semantic tag (`<b>`, `<i>`, `<u>`, `<s>`), which the tag defaults turn
//! back into the same format part on the next parse. An explicit `false` is
//! emitted as the neutralizing style value unless the implicit format is
//! already `false`, so the flag reads back on the next parse.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::element::StyledElement;
use super::super::parts::{Format, VerticalAlign};

pub fn parse_bold(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    match element.style("font-weight") {
        Some("bold" | "bolder") => format.bold = Some(true),
        Some("normal" | "lighter" | "initial") => format.bold = Some(false),
        Some(weight) => {
            if let Ok(numeric) = weight.parse::<u32>() {
                format.bold = Some(numeric >= 600);
            }
        }
        None => {}
    }
}

pub fn apply_bold(format: &Format, node: DomNodeId, dom: &mut DomTree, ctx: &mut ApplyContext) {
    match (format.bold, ctx.implicit.bold) {
        (Some(true), Some(true)) | (Some(false), Some(false)) => {}
        (Some(true), _) => {
            dom.wrap_children(node, "b");
        }
        (Some(false), _) => dom.set_style(node, "font-weight", "normal"),
        (None, _) => {}
    }
}

pub fn parse_italic(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    match element.style("font-style") {
        Some("italic" | "oblique") => format.italic = Some(true),
        Some("normal" | "initial") => format.italic = Some(false),
        _ => {}
    }
}

pub fn apply_italic(format: &Format, node: DomNodeId, dom: &mut DomTree, ctx: &mut ApplyContext) {
    match (format.italic, ctx.implicit.italic) {
        (Some(true), Some(true)) | (Some(false), Some(false)) => {}
        (Some(true), _) => {
            dom.wrap_children(node, "i");
        }
        (Some(false), _) => dom.set_style(node, "font-style", "normal"),
        (None, _) => {}
    }
}

fn parse_decoration_line(format: &mut Format, value: &str) {
    for word in value.split_ascii_whitespace() {
        match word {
            "underline" => format.underline = Some(true),
            "line-through" => format.strikethrough = Some(true),
            "none" => {
                format.underline = Some(false);
                format.strikethrough = Some(false);
            }
            _ => {}
        }
    }
}

pub fn parse_underline(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.style("text-decoration") {
        parse_decoration_line(format, value);
    }
}

pub fn apply_underline(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    match (format.underline, ctx.implicit.underline) {
        (Some(true), Some(true)) | (Some(false), Some(false)) => {}
        (Some(true), _) => {
            dom.wrap_children(node, "u");
        }
        (Some(false), _) => dom.set_style(node, "text-decoration", "none"),
        (None, _) => {}
    }
}

/// Strikethrough shares `text-decoration` with underline; its parser is a
/// no-op and parsing happens in [`parse_underline`].
pub fn parse_strikethrough(
    _format: &mut Format,
    _element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
}

pub fn apply_strikethrough(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    match (format.strikethrough, ctx.implicit.strikethrough) {
        (Some(true), Some(true)) | (Some(false), Some(false)) => {}
        (Some(true), _) => {
            dom.wrap_children(node, "s");
        }
        (Some(false), _) => {
            // The underline applier shares this declaration; write it once.
            let underline_wrote =
                format.underline == Some(false) && ctx.implicit.underline != Some(false);
            if !underline_wrote {
                dom.set_style(node, "text-decoration", "none");
            }
        }
        (None, _) => {}
    }
}

pub fn parse_vertical_align(
    format: &mut Format,
    element: &StyledElement<'_>,
    _ctx: &mut ParseContext,
) {
    match element.style("vertical-align") {
        Some("super") => format.vertical_align = Some(VerticalAlign::Superscript),
        Some("sub") => format.vertical_align = Some(VerticalAlign::Subscript),
        _ => {}
    }
}

pub fn apply_vertical_align(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(align) = format.vertical_align
        && ctx.implicit.vertical_align != Some(align)
    {
        let tag = match align {
            VerticalAlign::Superscript => "sup",
            VerticalAlign::Subscript => "sub",
        };
        dom.wrap_children(node, tag);
    }
}

pub fn parse_line_height(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.style("line-height")
        && value != "normal"
    {
        format.line_height = Some(value.to_string());
    }
}

pub fn apply_line_height(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(ref value) = format.line_height
        && ctx.implicit.line_height.as_deref() != Some(value.as_str())
    {
        dom.set_style(node, "line-height", value);
    }
}

pub fn parse_white_space(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.style("white-space") {
        format.white_space = Some(value.to_string());
    }
}

pub fn apply_white_space(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if let Some(ref value) = format.white_space
        && ctx.implicit.white_space.as_deref() != Some(value.as_str())
    {
        dom.set_style(node, "white-space", value);
    }
}
