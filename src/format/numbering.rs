//! Ordered-list marker styles and number formatting.
//!
//! CSS keywords cover the plain styles (decimal, lower-alpha, …). The
//! punctuated variants (dash, parenthesis) have no CSS keyword, so they are
//! described by string templates with `${Number}`, `${LowerAlpha}`,
//! `${UpperAlpha}`, `${LowerRoman}` and `${UpperRoman}` placeholders; at
//! apply time the placeholder is substituted with the item's formatted
//! number and emitted as a quoted `list-style-type` string.

use std::fmt::Write;

/// Ordered list numbering style, as persisted in list metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OrderedStyleType {
    Decimal = 1,
    DecimalDash = 2,
    DecimalParenthesis = 3,
    DecimalDoubleParenthesis = 4,
    LowerAlpha = 5,
    LowerAlphaParenthesis = 6,
    LowerAlphaDash = 7,
    UpperAlpha = 8,
    UpperAlphaParenthesis = 9,
    UpperAlphaDash = 10,
    LowerRoman = 11,
    LowerRomanParenthesis = 12,
    UpperRoman = 13,
    UpperRomanParenthesis = 14,
}

impl OrderedStyleType {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 14;

    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Decimal,
            2 => Self::DecimalDash,
            3 => Self::DecimalParenthesis,
            4 => Self::DecimalDoubleParenthesis,
            5 => Self::LowerAlpha,
            6 => Self::LowerAlphaParenthesis,
            7 => Self::LowerAlphaDash,
            8 => Self::UpperAlpha,
            9 => Self::UpperAlphaParenthesis,
            10 => Self::UpperAlphaDash,
            11 => Self::LowerRoman,
            12 => Self::LowerRomanParenthesis,
            13 => Self::UpperRoman,
            14 => Self::UpperRomanParenthesis,
            _ => return None,
        })
    }

    /// The marker template, or a plain CSS keyword for the unpunctuated
    /// styles.
    pub fn marker(&self) -> Marker {
        match self {
            OrderedStyleType::Decimal => Marker::Keyword("decimal"),
            OrderedStyleType::DecimalDash => Marker::Template("${Number}- "),
            OrderedStyleType::DecimalParenthesis => Marker::Template("${Number}) "),
            OrderedStyleType::DecimalDoubleParenthesis => Marker::Template("(${Number}) "),
            OrderedStyleType::LowerAlpha => Marker::Keyword("lower-alpha"),
            OrderedStyleType::LowerAlphaParenthesis => Marker::Template("${LowerAlpha}) "),
            OrderedStyleType::LowerAlphaDash => Marker::Template("${LowerAlpha}- "),
            OrderedStyleType::UpperAlpha => Marker::Keyword("upper-alpha"),
            OrderedStyleType::UpperAlphaParenthesis => Marker::Template("${UpperAlpha}) "),
            OrderedStyleType::UpperAlphaDash => Marker::Template("${UpperAlpha}- "),
            OrderedStyleType::LowerRoman => Marker::Keyword("lower-roman"),
            OrderedStyleType::LowerRomanParenthesis => Marker::Template("${LowerRoman}) "),
            OrderedStyleType::UpperRoman => Marker::Keyword("upper-roman"),
            OrderedStyleType::UpperRomanParenthesis => Marker::Template("${UpperRoman}) "),
        }
    }
}

/// Unordered list bullet style, as persisted in list metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UnorderedStyleType {
    Disc = 1,
    Square = 2,
    Circle = 3,
    Dash = 4,
    LongArrow = 5,
    DoubleLongArrow = 6,
    ShortArrow = 7,
    UnfilledArrow = 8,
    Hyphen = 9,
}

impl UnorderedStyleType {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Disc,
            2 => Self::Square,
            3 => Self::Circle,
            4 => Self::Dash,
            5 => Self::LongArrow,
            6 => Self::DoubleLongArrow,
            7 => Self::ShortArrow,
            8 => Self::UnfilledArrow,
            9 => Self::Hyphen,
            _ => return None,
        })
    }

    pub fn marker(&self) -> Marker {
        match self {
            UnorderedStyleType::Disc => Marker::Keyword("disc"),
            UnorderedStyleType::Square => Marker::Keyword("square"),
            UnorderedStyleType::Circle => Marker::Keyword("circle"),
            UnorderedStyleType::Dash => Marker::Literal("\u{2013} "),
            UnorderedStyleType::LongArrow => Marker::Literal("\u{2192} "),
            UnorderedStyleType::DoubleLongArrow => Marker::Literal("\u{21d2} "),
            UnorderedStyleType::ShortArrow => Marker::Literal("\u{2192} "),
            UnorderedStyleType::UnfilledArrow => Marker::Literal("\u{21e8} "),
            UnorderedStyleType::Hyphen => Marker::Literal("- "),
        }
    }
}

/// How a list marker is realized in CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A plain `list-style-type` keyword, set on the list element.
    Keyword(&'static str),
    /// A per-item template substituted with the item number and emitted as a
    /// quoted `list-style-type` string on the list item.
    Template(&'static str),
    /// A fixed literal marker string (bullets).
    Literal(&'static str),
}

impl Marker {
    /// The `list-style-type` value for a given item number, quoting
    /// template/literal markers.
    pub fn css_value(&self, number: u32) -> String {
        match self {
            Marker::Keyword(kw) => (*kw).to_string(),
            Marker::Template(template) => format!("\"{}\"", substitute(template, number)),
            Marker::Literal(lit) => format!("\"{lit}\""),
        }
    }

    /// Whether this marker needs per-item emission.
    pub fn is_per_item(&self) -> bool {
        matches!(self, Marker::Template(_))
    }
}

/// Substitute `${...}` placeholders in a marker template.
fn substitute(template: &str, number: u32) -> String {
    let mut out = String::with_capacity(template.len() + 4);
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        match &after[..end] {
            "Number" => write!(out, "{number}").unwrap(),
            "LowerAlpha" => out.push_str(&to_alpha(number, false)),
            "UpperAlpha" => out.push_str(&to_alpha(number, true)),
            "LowerRoman" => out.push_str(&to_roman(number, false)),
            "UpperRoman" => out.push_str(&to_roman(number, true)),
            unknown => {
                out.push_str("${");
                out.push_str(unknown);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Convert a 1-based number to base-26 alphabetic form (1 → a, 27 → aa).
pub fn to_alpha(mut number: u32, upper: bool) -> String {
    let base = if upper { b'A' } else { b'a' };
    let mut out = Vec::new();
    while number > 0 {
        number -= 1;
        out.push(base + (number % 26) as u8);
        number /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Convert a 1-based number to roman numerals using subtractive notation.
pub fn to_roman(mut number: u32, upper: bool) -> String {
    const PAIRS: &[(u32, &str)] = &[
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for &(value, digits) in PAIRS {
        while number >= value {
            out.push_str(digits);
            number -= value;
        }
    }
    if upper { out.to_uppercase() } else { out }
}
