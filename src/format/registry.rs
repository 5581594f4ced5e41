//! Format handler registry.
//!
//! Every format concern is a [`FormatKey`]; [`default_handler`] maps each
//! key to its built-in (parse, apply) pair through an exhaustive match, so
//! adding a key without a handler fails to compile. A registry starts from
//! the defaults and holds caller overrides; lookups copy out the effective
//! handler, leaving the registry itself immutable during conversion.

use std::collections::HashMap;

use crate::dom::{DomNodeId, DomTree};

use super::context::{ApplyContext, ParseContext};
use super::element::StyledElement;
use super::handlers::{border, box_model, decoration, direction, font, list, size, table};
use super::parts::Format;

/// Reads one format concern off an element into the format record.
pub type FormatParser = fn(&mut Format, &StyledElement<'_>, &mut ParseContext);

/// Writes one format concern from the record onto a DOM node.
pub type FormatApplier = fn(&Format, DomNodeId, &mut DomTree, &mut ApplyContext);

/// A paired parser and applier for one format concern.
#[derive(Clone, Copy)]
pub struct FormatHandler {
    pub parse: FormatParser,
    pub apply: FormatApplier,
}

/// Identifies one format concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKey {
    Direction,
    TextAlign,
    HtmlAlign,
    FontFamily,
    FontSize,
    TextColor,
    BackgroundColor,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    VerticalAlign,
    LineHeight,
    WhiteSpace,
    Margin,
    Padding,
    Border,
    Size,
    Id,
    ListStyle,
    ListThread,
    ListItemAlign,
    TableSpacing,
}

/// The built-in handler for a key.
pub fn default_handler(key: FormatKey) -> FormatHandler {
    let (parse, apply): (FormatParser, FormatApplier) = match key {
        FormatKey::Direction => (direction::parse_direction, direction::apply_direction),
        FormatKey::TextAlign => (direction::parse_text_align, direction::apply_text_align),
        FormatKey::HtmlAlign => (direction::parse_html_align, direction::apply_html_align),
        FormatKey::FontFamily => (font::parse_font_family, font::apply_font_family),
        FormatKey::FontSize => (font::parse_font_size, font::apply_font_size),
        FormatKey::TextColor => (font::parse_text_color, font::apply_text_color),
        FormatKey::BackgroundColor => {
            (font::parse_background_color, font::apply_background_color)
        }
        FormatKey::Bold => (decoration::parse_bold, decoration::apply_bold),
        FormatKey::Italic => (decoration::parse_italic, decoration::apply_italic),
        FormatKey::Underline => (decoration::parse_underline, decoration::apply_underline),
        FormatKey::Strikethrough => {
            (decoration::parse_strikethrough, decoration::apply_strikethrough)
        }
        FormatKey::VerticalAlign => {
            (decoration::parse_vertical_align, decoration::apply_vertical_align)
        }
        FormatKey::LineHeight => (decoration::parse_line_height, decoration::apply_line_height),
        FormatKey::WhiteSpace => (decoration::parse_white_space, decoration::apply_white_space),
        FormatKey::Margin => (box_model::parse_margin, box_model::apply_margin),
        FormatKey::Padding => (box_model::parse_padding, box_model::apply_padding),
        FormatKey::Border => (border::parse_border, border::apply_border),
        FormatKey::Size => (size::parse_size, size::apply_size),
        FormatKey::Id => (size::parse_id, size::apply_id),
        FormatKey::ListStyle => (list::parse_list_style, list::apply_list_style),
        FormatKey::ListThread => (list::parse_list_thread, list::apply_list_thread),
        FormatKey::ListItemAlign => {
            (direction::parse_list_item_align, direction::apply_list_item_align)
        }
        FormatKey::TableSpacing => (table::parse_table_spacing, table::apply_table_spacing),
    };
    FormatHandler { parse, apply }
}

/// The kind of model node a format is being read or written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatScope {
    Segment,
    Block,
    ListLevel,
    ListItem,
    Table,
    TableCell,
}

/// The keys that participate in each scope, in execution order.
///
/// Ordering matters in two places: `Direction` runs before the alignment
/// parsers that interpret physical keywords, and `HtmlAlign` runs last so
/// its precedence over `TextAlign` holds on apply.
pub fn scope_keys(scope: FormatScope) -> &'static [FormatKey] {
    use FormatKey::*;
    match scope {
        FormatScope::Segment => &[
            FontFamily,
            FontSize,
            TextColor,
            BackgroundColor,
            Bold,
            Italic,
            Underline,
            Strikethrough,
            VerticalAlign,
            LineHeight,
            WhiteSpace,
        ],
        FormatScope::Block => &[
            Direction,
            Margin,
            Padding,
            Border,
            BackgroundColor,
            LineHeight,
            WhiteSpace,
            TextAlign,
            HtmlAlign,
        ],
        FormatScope::ListLevel => &[
            Direction,
            ListStyle,
            ListThread,
            Margin,
            Padding,
            TextAlign,
        ],
        FormatScope::ListItem => &[Direction, ListStyle, ListItemAlign],
        FormatScope::Table => &[
            Id,
            Size,
            Direction,
            Margin,
            Border,
            BackgroundColor,
            TableSpacing,
            TextAlign,
            HtmlAlign,
        ],
        FormatScope::TableCell => &[
            Size,
            Direction,
            Border,
            Padding,
            BackgroundColor,
            TextAlign,
            HtmlAlign,
        ],
    }
}

/// Immutable handler registry with caller overrides.
#[derive(Default)]
pub struct FormatRegistry {
    overrides: HashMap<FormatKey, FormatHandler>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the handler for one key.
    pub fn with_override(mut self, key: FormatKey, handler: FormatHandler) -> Self {
        self.overrides.insert(key, handler);
        self
    }

    /// The effective handler for a key, copied out.
    pub fn handler(&self, key: FormatKey) -> FormatHandler {
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| default_handler(key))
    }

    /// Run every parser in a scope against an element.
    pub fn parse(
        &self,
        scope: FormatScope,
        format: &mut Format,
        element: &StyledElement<'_>,
        ctx: &mut ParseContext,
    ) {
        for key in scope_keys(scope) {
            (self.handler(*key).parse)(format, element, ctx);
        }
    }

    /// Run every applier in a scope against a DOM node.
    pub fn apply(
        &self,
        scope: FormatScope,
        format: &Format,
        node: DomNodeId,
        dom: &mut DomTree,
        ctx: &mut ApplyContext,
    ) {
        for key in scope_keys(scope) {
            (self.handler(*key).apply)(format, node, dom, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_copy_on_read() {
        fn noop_parse(_: &mut Format, _: &StyledElement<'_>, _: &mut ParseContext) {}
        fn marker_apply(_: &Format, node: DomNodeId, dom: &mut DomTree, _: &mut ApplyContext) {
            dom.set_attr(node, "data-custom", "1");
        }

        let registry = FormatRegistry::new().with_override(
            FormatKey::Bold,
            FormatHandler {
                parse: noop_parse,
                apply: marker_apply,
            },
        );

        let mut dom = DomTree::new();
        let span = dom.create_tag("span");
        dom.append(dom.document(), span);

        let mut format = Format::default();
        format.bold = Some(true);
        let mut ctx = ApplyContext::default();
        (registry.handler(FormatKey::Bold).apply)(&format, span, &mut dom, &mut ctx);
        assert_eq!(dom.get_attr(span, "data-custom"), Some("1"));

        // Untouched keys still resolve to the defaults.
        let default = registry.handler(FormatKey::Italic);
        let mut format = Format::default();
        format.italic = Some(true);
        (default.apply)(&format, span, &mut dom, &mut ctx);
        assert_eq!(dom.children(span).count(), 1);
    }

    #[test]
    fn test_block_scope_parses_alignment_after_direction() {
        let mut dom = DomTree::new();
        let div = dom.create_tag("div");
        dom.append(dom.document(), div);
        dom.set_attr(div, "dir", "rtl");
        dom.set_style(div, "text-align", "left");

        let registry = FormatRegistry::new();
        let mut format = Format::default();
        let mut ctx = ParseContext::default();
        let element = StyledElement::new(&dom, div).unwrap();
        registry.parse(FormatScope::Block, &mut format, &element, &mut ctx);

        use crate::format::css::{Direction, TextAlign};
        assert_eq!(format.direction, Some(Direction::Rtl));
        // Physical left under rtl is logical end.
        assert_eq!(format.text_align, Some(TextAlign::End));
    }
}
