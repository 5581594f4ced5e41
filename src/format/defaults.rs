//! Per-tag declarative default styles.
//!
//! These mirror what a browser user-agent stylesheet establishes for each
//! element. Parsers consult them so the model captures the effective value
//! (`<b>` reads as bold even without inline style); the writer extends its
//! implicit format with them so matching values are not re-emitted.

use super::css::{TextAlign, parse_length};
use super::parts::{Format, VerticalAlign};

/// Declarative default style for an element, as (property, value) pairs.
pub fn default_style(tag: &str) -> &'static [(&'static str, &'static str)] {
    match tag {
        "b" | "strong" => &[("font-weight", "bold")],
        "i" | "em" | "cite" | "var" | "dfn" => &[("font-style", "italic")],
        "u" | "ins" => &[("text-decoration", "underline")],
        "s" | "strike" | "del" => &[("text-decoration", "line-through")],
        "sub" => &[("vertical-align", "sub")],
        "sup" => &[("vertical-align", "super")],
        "code" | "kbd" | "samp" | "tt" => &[("font-family", "monospace")],
        "pre" => &[("font-family", "monospace"), ("white-space", "pre")],

        "p" => &[("margin-top", "1em"), ("margin-bottom", "1em")],
        "h1" => &[
            ("font-weight", "bold"),
            ("font-size", "2em"),
            ("margin-top", "0.67em"),
            ("margin-bottom", "0.67em"),
        ],
        "h2" => &[
            ("font-weight", "bold"),
            ("font-size", "1.5em"),
            ("margin-top", "0.83em"),
            ("margin-bottom", "0.83em"),
        ],
        "h3" => &[
            ("font-weight", "bold"),
            ("font-size", "1.17em"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
        ],
        "h4" => &[
            ("font-weight", "bold"),
            ("margin-top", "1.33em"),
            ("margin-bottom", "1.33em"),
        ],
        "h5" => &[
            ("font-weight", "bold"),
            ("font-size", "0.83em"),
            ("margin-top", "1.67em"),
            ("margin-bottom", "1.67em"),
        ],
        "h6" => &[
            ("font-weight", "bold"),
            ("font-size", "0.67em"),
            ("margin-top", "2.33em"),
            ("margin-bottom", "2.33em"),
        ],

        "blockquote" => &[
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
            ("margin-left", "40px"),
            ("margin-right", "40px"),
        ],

        "ol" | "ul" => &[
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
            ("padding-left", "40px"),
        ],

        "th" => &[("font-weight", "bold"), ("text-align", "center")],

        "hr" => &[("margin-top", "0.5em"), ("margin-bottom", "0.5em")],

        _ => &[],
    }
}

/// The [`Format`] a tag implies on its own, built from [`default_style`].
///
/// The writer passes this as the implicit format when emitting into a
/// decorator tag, so appliers skip values the tag already establishes.
pub fn implicit_format(tag: &str) -> Format {
    let mut format = Format::default();
    for (prop, value) in default_style(tag) {
        match *prop {
            "font-weight" => format.bold = Some(*value == "bold"),
            "font-style" => format.italic = Some(*value == "italic"),
            "text-decoration" => match *value {
                "underline" => format.underline = Some(true),
                "line-through" => format.strikethrough = Some(true),
                _ => {}
            },
            "vertical-align" => match *value {
                "sub" => format.vertical_align = Some(VerticalAlign::Subscript),
                "super" => format.vertical_align = Some(VerticalAlign::Superscript),
                _ => {}
            },
            "font-family" => format.font_family = Some((*value).to_string()),
            "font-size" => format.font_size = parse_length(value),
            "white-space" => format.white_space = Some((*value).to_string()),
            "text-align" => {
                if *value == "center" {
                    format.text_align = Some(TextAlign::Center);
                }
            }
            "margin-top" => format.margin.top = parse_length(value),
            "margin-right" => format.margin.right = parse_length(value),
            "margin-bottom" => format.margin.bottom = parse_length(value),
            "margin-left" => format.margin.left = parse_length(value),
            "padding-left" => format.padding.left = parse_length(value),
            _ => {}
        }
    }
    format
}

/// Tags treated as block-level during the DOM walk.
pub fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "div"
            | "dl"
            | "dd"
            | "dt"
            | "fieldset"
            | "figure"
            | "figcaption"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_lookup() {
        assert_eq!(default_style("b"), &[("font-weight", "bold")]);
        assert!(default_style("span").is_empty());
    }

    #[test]
    fn test_implicit_format() {
        let h1 = implicit_format("h1");
        assert_eq!(h1.bold, Some(true));
        assert!(h1.font_size.is_some());
        assert!(h1.margin.top.is_some());

        assert!(implicit_format("span").is_empty());
    }

    #[test]
    fn test_block_tags() {
        assert!(is_block_tag("div"));
        assert!(is_block_tag("table"));
        assert!(!is_block_tag("span"));
        assert!(!is_block_tag("img"));
    }
}
