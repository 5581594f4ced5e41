//! List style and numbering thread handlers.
//!
//! Ordered lists number continuously across sibling `<ol>` elements: a list
//! with no `start` attribute continues the thread at its depth, and only an
//! explicit `start` diverging from that continuation records an override.
//! Applying emits a `start` attribute for every continuation past 1 and for
//! every override, so the attribute survives a round trip and a thread head
//! starting at 1 stays bare. Parse and apply are exact inverses of each
//! other; parse then apply then parse is a fixed point.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::element::StyledElement;
use super::super::parts::Format;

pub fn parse_list_style(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    if let Some(value) = element.style("list-style-type") {
        format.list_style_type = Some(value.to_string());
    } else if let Some(attr) = element.attr("type") {
        // Legacy type attribute on ol/ul.
        let value = match attr {
            "1" => Some("decimal"),
            "a" => Some("lower-alpha"),
            "A" => Some("upper-alpha"),
            "i" => Some("lower-roman"),
            "I" => Some("upper-roman"),
            _ => None,
        };
        if let Some(value) = value {
            format.list_style_type = Some(value.to_string());
        }
    }
}

pub fn apply_list_style(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    _ctx: &mut ApplyContext,
) {
    if let Some(ref value) = format.list_style_type {
        dom.set_style(node, "list-style-type", value);
    }
}

pub fn parse_list_thread(format: &mut Format, element: &StyledElement<'_>, ctx: &mut ParseContext) {
    if element.tag() != "ol" {
        return;
    }
    let natural = ctx.list.natural_start();
    match element.attr("start").and_then(|s| s.trim().parse::<i32>().ok()) {
        Some(actual) => {
            if actual != natural {
                format.start_number_override = Some(actual);
            }
            ctx.list.set_start(actual);
        }
        // No attribute: the thread continues uninterrupted.
        None => ctx.list.set_start(natural),
    }
}

pub fn apply_list_thread(
    format: &Format,
    node: DomNodeId,
    dom: &mut DomTree,
    ctx: &mut ApplyContext,
) {
    if dom.element_name(node).map(|n| n.as_ref() != "ol").unwrap_or(true) {
        return;
    }
    let natural = ctx.list.natural_start();
    let effective = format.start_number_override.unwrap_or(natural);
    // An override is always written out, even an explicit restart at 1;
    // otherwise only a continuation past 1 needs the attribute.
    if format.start_number_override.is_some() || effective != 1 {
        dom.set_attr(node, "start", &effective.to_string());
    }
    ctx.list.set_start(effective);
}
