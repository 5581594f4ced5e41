//! Margin and padding handlers.
//!
//! Parsing walks the declarations in cascade order so shorthands and
//! longhands resolve the same way the CSSOM would. Applying writes the
//! minimal shorthand when all four sides are present, longhands otherwise.
//!
//! Margins carry an extra contract against the implicit format: when the
//! writer asks for it, a side the decorator tag implies but the model does
//! not carry is explicitly zeroed, so a `<p>` without margins in the model
//! writes `margin-top: 0px`. List levels opt out and keep native spacing.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{
    CssLength, ToCss, collapse_shorthand_4, parse_box_shorthand, parse_length, parse_length_value,
};
use super::super::element::StyledElement;
use super::super::parts::{BoxSides, Format};

fn parse_box_sides(sides: &mut BoxSides<CssLength>, element: &StyledElement<'_>, base: &str) {
    for (prop, value) in element.styles() {
        if prop == base {
            if let Some((t, r, b, l)) = parse_box_shorthand(value, parse_length_value) {
                sides.top = Some(t);
                sides.right = Some(r);
                sides.bottom = Some(b);
                sides.left = Some(l);
            }
        } else if let Some(side) = prop.strip_prefix(base).and_then(|s| s.strip_prefix('-')) {
            let Some(length) = parse_length(value) else {
                continue;
            };
            match side {
                "top" => sides.top = Some(length),
                "right" => sides.right = Some(length),
                "bottom" => sides.bottom = Some(length),
                "left" => sides.left = Some(length),
                _ => {}
            }
        }
    }
}

/// Resolve a side against the implicit format.
///
/// `zero_implicit` emits "0px" for sides the implicit format sets but the
/// model leaves unset (the margin contract).
fn resolve_side(
    value: Option<CssLength>,
    implicit: Option<CssLength>,
    zero_implicit: bool,
) -> Option<String> {
    match (value, implicit) {
        (Some(v), Some(i)) if v == i => None,
        (Some(v), _) => Some(v.to_css_string()),
        (None, Some(_)) if zero_implicit => Some("0px".to_string()),
        (None, _) => None,
    }
}

fn emit_box_sides(dom: &mut DomTree, node: DomNodeId, base: &str, sides: [Option<String>; 4]) {
    match sides {
        [Some(t), Some(r), Some(b), Some(l)] => {
            dom.set_style(node, base, &collapse_shorthand_4(&t, &r, &b, &l));
        }
        [t, r, b, l] => {
            let longhands = [("top", t), ("right", r), ("bottom", b), ("left", l)];
            for (side, value) in longhands {
                if let Some(value) = value {
                    dom.set_style(node, &format!("{base}-{side}"), &value);
                }
            }
        }
    }
}

pub fn parse_margin(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    parse_box_sides(&mut format.margin, element, "margin");
}

pub fn apply_margin(format: &Format, node: DomNodeId, dom: &mut DomTree, ctx: &mut ApplyContext) {
    let implicit = &ctx.implicit.margin;
    let zero = ctx.zero_unset_margins;
    let sides = [
        resolve_side(format.margin.top, implicit.top, zero),
        resolve_side(format.margin.right, implicit.right, zero),
        resolve_side(format.margin.bottom, implicit.bottom, zero),
        resolve_side(format.margin.left, implicit.left, zero),
    ];
    emit_box_sides(dom, node, "margin", sides);
}

pub fn parse_padding(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    parse_box_sides(&mut format.padding, element, "padding");
}

pub fn apply_padding(format: &Format, node: DomNodeId, dom: &mut DomTree, ctx: &mut ApplyContext) {
    let implicit = &ctx.implicit.padding;
    let sides = [
        resolve_side(format.padding.top, implicit.top, false),
        resolve_side(format.padding.right, implicit.right, false),
        resolve_side(format.padding.bottom, implicit.bottom, false),
        resolve_side(format.padding.left, implicit.left, false),
    ];
    emit_box_sides(dom, node, "padding", sides);
}
