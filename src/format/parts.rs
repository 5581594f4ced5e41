//! Format part definitions.
//!
//! A node's format is one plain record of independent optional parts. Each
//! field corresponds to one CSS/HTML concern and is owned by exactly one
//! format handler; `None` always means "not specified, cascade applies".

use super::css::{BorderSideValue, Color, CssLength, Direction, TextAlign};

/// Vertical alignment for inline segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Superscript,
    Subscript,
}

/// Four optional values, one per box side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxSides<T> {
    pub top: Option<T>,
    pub right: Option<T>,
    pub bottom: Option<T>,
    pub left: Option<T>,
}

impl<T> BoxSides<T> {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// All four sides present?
    pub fn is_full(&self) -> bool {
        self.top.is_some() && self.right.is_some() && self.bottom.is_some() && self.left.is_some()
    }

    pub fn set_all(&mut self, value: T)
    where
        T: Clone,
    {
        self.top = Some(value.clone());
        self.right = Some(value.clone());
        self.bottom = Some(value.clone());
        self.left = Some(value);
    }
}

/// The format record attached to every content model node.
///
/// Only the parts relevant to a node's kind are ever populated: the registry
/// runs segment parsers on segments, block parsers on blocks, and so on, so
/// e.g. `list_style_type` stays `None` outside list levels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Format {
    // Bidi and alignment
    pub direction: Option<Direction>,
    pub text_align: Option<TextAlign>,
    /// Alignment coming from the legacy `align` attribute. Takes precedence
    /// over `text_align` when both are present.
    pub html_align: Option<TextAlign>,

    // Font
    pub font_family: Option<String>,
    pub font_size: Option<CssLength>,
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub vertical_align: Option<VerticalAlign>,
    /// Raw value, since unitless line heights have no length representation.
    pub line_height: Option<String>,
    pub white_space: Option<String>,

    // Box model
    pub margin: BoxSides<CssLength>,
    pub padding: BoxSides<CssLength>,
    pub border: BoxSides<BorderSideValue>,

    // Size
    pub width: Option<CssLength>,
    pub height: Option<CssLength>,
    pub id: Option<String>,

    // List level
    pub list_style_type: Option<String>,
    pub start_number_override: Option<i32>,

    // Table
    pub border_collapse: Option<bool>,
    pub border_spacing: Option<CssLength>,
    pub use_border_box: Option<bool>,
}

impl Format {
    pub fn is_empty(&self) -> bool {
        *self == Format::default()
    }

    /// Merge another format on top of this one: fields set in `other` win.
    pub fn extend(&self, other: &Format) -> Format {
        let mut merged = self.clone();
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { merged.$field = other.$field.clone(); })*
            };
        }
        take!(
            direction,
            text_align,
            html_align,
            font_family,
            font_size,
            text_color,
            background_color,
            bold,
            italic,
            underline,
            strikethrough,
            vertical_align,
            line_height,
            white_space,
            width,
            height,
            id,
            list_style_type,
            start_number_override,
            border_collapse,
            border_spacing,
            use_border_box
        );
        macro_rules! take_sides {
            ($($field:ident),*) => {
                $(
                    if other.$field.top.is_some() { merged.$field.top = other.$field.top.clone(); }
                    if other.$field.right.is_some() { merged.$field.right = other.$field.right.clone(); }
                    if other.$field.bottom.is_some() { merged.$field.bottom = other.$field.bottom.clone(); }
                    if other.$field.left.is_some() { merged.$field.left = other.$field.left.clone(); }
                )*
            };
        }
        take_sides!(margin, padding, border);
        merged
    }

    /// Just the inline (segment-level) parts of this format.
    ///
    /// Used when deriving the implicit format a wrapper establishes for its
    /// inline content, so block-only parts like margins do not leak into
    /// suppression decisions for nested segments.
    pub fn segment_subset(&self) -> Format {
        Format {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            text_color: self.text_color,
            background_color: self.background_color,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
            vertical_align: self.vertical_align,
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            ..Format::default()
        }
    }
}

/// Custom `data-*` entries attached to nodes that support metadata.
///
/// Names are stored without the `data-` prefix, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    entries: Vec<(String, String)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an entry, fully replacing any prior value.
    pub fn set(&mut self, name: &str, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extend() {
        let mut base = Format::default();
        base.bold = Some(true);
        base.font_size = Some(CssLength::Px(16.0));

        let mut over = Format::default();
        over.font_size = Some(CssLength::Px(24.0));
        over.italic = Some(true);

        let merged = base.extend(&over);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
        assert_eq!(merged.font_size, Some(CssLength::Px(24.0)));
    }

    #[test]
    fn test_dataset_replace() {
        let mut ds = Dataset::new();
        ds.set("editing-info", "{}".to_string());
        ds.set("editing-info", r#"{"a":1}"#.to_string());
        assert_eq!(ds.get("editing-info"), Some(r#"{"a":1}"#));
        assert_eq!(ds.iter().count(), 1);
    }
}
