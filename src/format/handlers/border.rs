//! Border handler.
//!
//! Parsing accepts the `border` shorthand, per-side shorthands, and the
//! component lists (`border-width`, `border-style`, `border-color`).
//! Applying emits the most compact form that reproduces the parsed state:
//! one `border` declaration when all four sides agree, collapsed component
//! lists when every side carries the same components, per-side shorthands
//! otherwise.

use crate::dom::{DomNodeId, DomTree};

use super::super::context::{ApplyContext, ParseContext};
use super::super::css::{
    BorderSideValue, Color, CssLength, ToCss, collapse_shorthand_4, parse_border_side,
    parse_box_shorthand, parse_color_value, parse_length_value,
};
use super::super::element::StyledElement;
use super::super::parts::{BoxSides, Format};

const BORDER_STYLE_KEYWORDS: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

fn side_mut<'a>(
    sides: &'a mut BoxSides<BorderSideValue>,
    which: &str,
) -> Option<&'a mut Option<BorderSideValue>> {
    match which {
        "top" => Some(&mut sides.top),
        "right" => Some(&mut sides.right),
        "bottom" => Some(&mut sides.bottom),
        "left" => Some(&mut sides.left),
        _ => None,
    }
}

fn ensure_side(slot: &mut Option<BorderSideValue>) -> &mut BorderSideValue {
    slot.get_or_insert_with(|| BorderSideValue {
        width: None,
        style: None,
        color: None,
    })
}

pub fn parse_border(format: &mut Format, element: &StyledElement<'_>, _ctx: &mut ParseContext) {
    for (prop, value) in element.styles() {
        match prop {
            "border" => {
                if let Some(side) = parse_border_side(value) {
                    format.border.set_all(side);
                }
            }
            "border-width" => {
                if let Some((t, r, b, l)) = parse_box_shorthand(value, parse_length_value) {
                    for (slot, width) in zip_sides(&mut format.border, [t, r, b, l]) {
                        ensure_side(slot).width = Some(width);
                    }
                }
            }
            "border-style" => {
                if let Some((t, r, b, l)) = parse_box_shorthand(value, parse_style_keyword) {
                    for (slot, style) in zip_sides(&mut format.border, [t, r, b, l]) {
                        ensure_side(slot).style = Some(style.to_string());
                    }
                }
            }
            "border-color" => {
                if let Some((t, r, b, l)) = parse_box_shorthand(value, parse_color_value) {
                    for (slot, color) in zip_sides(&mut format.border, [t, r, b, l]) {
                        ensure_side(slot).color = Some(color);
                    }
                }
            }
            "border-top" | "border-right" | "border-bottom" | "border-left" => {
                let which = &prop["border-".len()..];
                if let Some(parsed) = parse_border_side(value)
                    && let Some(slot) = side_mut(&mut format.border, which)
                {
                    *slot = Some(parsed);
                }
            }
            _ => {}
        }
    }
}

fn parse_style_keyword(input: &mut cssparser::Parser<'_, '_>) -> Option<&'static str> {
    let ident = input.expect_ident_cloned().ok()?;
    BORDER_STYLE_KEYWORDS
        .iter()
        .find(|s| **s == ident.as_ref())
        .copied()
}

fn zip_sides<T>(
    sides: &mut BoxSides<BorderSideValue>,
    values: [T; 4],
) -> impl Iterator<Item = (&mut Option<BorderSideValue>, T)> {
    let [t, r, b, l] = values;
    [
        (&mut sides.top, t),
        (&mut sides.right, r),
        (&mut sides.bottom, b),
        (&mut sides.left, l),
    ]
    .into_iter()
}

pub fn apply_border(format: &Format, node: DomNodeId, dom: &mut DomTree, _ctx: &mut ApplyContext) {
    let border = &format.border;
    if border.is_empty() {
        return;
    }

    if border.is_full() {
        let sides = [
            border.top.as_ref(),
            border.right.as_ref(),
            border.bottom.as_ref(),
            border.left.as_ref(),
        ]
        .map(|s| s.cloned().unwrap_or(BorderSideValue {
            width: None,
            style: None,
            color: None,
        }));

        if sides.iter().all(|s| *s == sides[0]) {
            dom.set_style(node, "border", &sides[0].to_css_string());
            return;
        }

        let widths: Vec<_> = sides.iter().map(|s| s.width).collect();
        let styles: Vec<_> = sides.iter().map(|s| s.style.clone()).collect();
        let colors: Vec<_> = sides.iter().map(|s| s.color).collect();
        let uniform = |present: &[bool]| present.iter().all(|p| *p) || present.iter().all(|p| !*p);
        let w_present: Vec<_> = widths.iter().map(|w| w.is_some()).collect();
        let s_present: Vec<_> = styles.iter().map(|s| s.is_some()).collect();
        let c_present: Vec<_> = colors.iter().map(|c| c.is_some()).collect();

        if uniform(&w_present) && uniform(&s_present) && uniform(&c_present) {
            if w_present[0] {
                emit_component_list(dom, node, "border-width", &widths, |w: &CssLength| {
                    w.to_css_string()
                });
            }
            if s_present[0] {
                emit_component_list(dom, node, "border-style", &styles, |s: &String| s.clone());
            }
            if c_present[0] {
                emit_component_list(dom, node, "border-color", &colors, |c: &Color| {
                    c.to_css_string()
                });
            }
            return;
        }
    }

    let longhands = [
        ("border-top", &border.top),
        ("border-right", &border.right),
        ("border-bottom", &border.bottom),
        ("border-left", &border.left),
    ];
    for (prop, side) in longhands {
        if let Some(side) = side {
            dom.set_style(node, prop, &side.to_css_string());
        }
    }
}

fn emit_component_list<T>(
    dom: &mut DomTree,
    node: DomNodeId,
    prop: &str,
    values: &[Option<T>],
    render: impl Fn(&T) -> String,
) {
    let rendered: Vec<String> = values
        .iter()
        .map(|v| v.as_ref().map(&render).unwrap_or_default())
        .collect();
    dom.set_style(
        node,
        prop,
        &collapse_shorthand_4(&rendered[0], &rendered[1], &rendered[2], &rendered[3]),
    );
}
