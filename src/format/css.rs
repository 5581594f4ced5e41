//! CSS value parsing and serialization.
//!
//! This module contains the tokenizer-level parsers for CSS values (lengths,
//! colors, border triples) and the serialization trait used by the appliers.
//! Parsers return `Option`; an unparsable value is simply not captured.

use std::fmt::Write;

use cssparser::{ParseError, Parser, ParserInput, Token};

/// Ratio used to convert points to pixels (1pt = 4000/3000 px).
const PT_TO_PX: f32 = 4000.0 / 3.0 / 1000.0;

/// Trait for converting format values back to CSS strings.
pub trait ToCss {
    /// Write this value as CSS to the buffer.
    fn to_css(&self, buf: &mut String);

    /// Convert to a CSS string (convenience method).
    fn to_css_string(&self) -> String {
        let mut buf = String::new();
        self.to_css(&mut buf);
        buf
    }
}

/// Length value with unit.
///
/// Pixels are the canonical unit: `pt` and `ex` are converted at parse time,
/// and appliers only ever emit `px`, `em`, `%` or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CssLength {
    #[default]
    Auto,
    Px(f32),
    Em(f32),
    Percent(f32),
}

impl CssLength {
    /// Resolve to pixels given the effective font size (for em) and
    /// container width (for %). Unresolvable values yield 0.
    pub fn to_px(&self, font_size_px: f32, container_px: f32) -> f32 {
        match self {
            CssLength::Auto => 0.0,
            CssLength::Px(v) => *v,
            CssLength::Em(v) => v * font_size_px,
            CssLength::Percent(v) => v / 100.0 * container_px,
        }
    }
}

impl ToCss for CssLength {
    fn to_css(&self, buf: &mut String) {
        match self {
            CssLength::Auto => buf.push_str("auto"),
            CssLength::Px(v) => write!(buf, "{}px", v).unwrap(),
            CssLength::Em(v) => write!(buf, "{}em", v).unwrap(),
            CssLength::Percent(v) => write!(buf, "{}%", v).unwrap(),
        }
    }
}

/// RGBA color (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Create a new opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with alpha.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl ToCss for Color {
    fn to_css(&self, buf: &mut String) {
        if self.a == 255 {
            write!(buf, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b).unwrap();
        } else if self.a == 0 {
            buf.push_str("transparent");
        } else {
            let alpha = self.a as f32 / 255.0;
            write!(buf, "rgba({},{},{},{:.2})", self.r, self.g, self.b, alpha).unwrap();
        }
    }
}

/// Text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Logical text alignment, relative to direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Physical alignment as emitted into the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalAlign {
    Left,
    Center,
    Right,
}

impl ToCss for PhysicalAlign {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(match self {
            PhysicalAlign::Left => "left",
            PhysicalAlign::Center => "center",
            PhysicalAlign::Right => "right",
        });
    }
}

/// The logical ⟷ physical alignment table, indexed `[align][direction]`.
///
/// The same table drives both apply (forward lookup) and parse (reverse
/// scan), which is what makes the alignment round-trip stable.
const ALIGN_TABLE: [[PhysicalAlign; 2]; 3] = [
    // Start:   ltr,                 rtl
    [PhysicalAlign::Left, PhysicalAlign::Right],
    // Center
    [PhysicalAlign::Center, PhysicalAlign::Center],
    // End
    [PhysicalAlign::Right, PhysicalAlign::Left],
];

fn align_index(align: TextAlign) -> usize {
    match align {
        TextAlign::Start => 0,
        TextAlign::Center => 1,
        TextAlign::End => 2,
    }
}

fn direction_index(direction: Direction) -> usize {
    match direction {
        Direction::Ltr => 0,
        Direction::Rtl => 1,
    }
}

/// Map a logical alignment to the physical value for the given direction.
pub fn physical_align(align: TextAlign, direction: Direction) -> PhysicalAlign {
    ALIGN_TABLE[align_index(align)][direction_index(direction)]
}

/// Map a physical alignment back to the logical value for the given
/// direction, scanning the same table used by [`physical_align`].
pub fn logical_align(physical: PhysicalAlign, direction: Direction) -> TextAlign {
    let di = direction_index(direction);
    for (ai, row) in ALIGN_TABLE.iter().enumerate() {
        if row[di] == physical {
            return match ai {
                0 => TextAlign::Start,
                1 => TextAlign::Center,
                _ => TextAlign::End,
            };
        }
    }
    TextAlign::Start
}

/// One side of a border: width, line style, color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderSideValue {
    pub width: Option<CssLength>,
    pub style: Option<String>,
    pub color: Option<Color>,
}

impl BorderSideValue {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.style.is_none() && self.color.is_none()
    }
}

impl ToCss for BorderSideValue {
    fn to_css(&self, buf: &mut String) {
        let mut first = true;
        if let Some(w) = self.width {
            w.to_css(buf);
            first = false;
        }
        if let Some(ref s) = self.style {
            if !first {
                buf.push(' ');
            }
            buf.push_str(s);
            first = false;
        }
        if let Some(c) = self.color {
            if !first {
                buf.push(' ');
            }
            c.to_css(buf);
        }
    }
}

/// Run a value parser over a raw CSS string.
pub fn with_parser<T>(value: &str, f: impl FnOnce(&mut Parser<'_, '_>) -> Option<T>) -> Option<T> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    f(&mut parser)
}

/// Parse a CSS length from a raw string, converting pt/ex to canonical form.
pub fn parse_length(value: &str) -> Option<CssLength> {
    with_parser(value, parse_length_value)
}

pub(crate) fn parse_length_value(input: &mut Parser<'_, '_>) -> Option<CssLength> {
    match input.next().ok()? {
        Token::Dimension { value, unit, .. } => {
            let length = match unit.as_ref() {
                "px" => CssLength::Px(*value),
                "em" => CssLength::Em(*value),
                "%" => CssLength::Percent(*value),
                // ex = x-height, approximately 0.5em
                "ex" => CssLength::Em(*value * 0.5),
                "pt" => CssLength::Px(*value * PT_TO_PX),
                _ => return None,
            };
            Some(length)
        }
        Token::Percentage { unit_value, .. } => Some(CssLength::Percent(*unit_value * 100.0)),
        Token::Number { value, .. } if *value == 0.0 => Some(CssLength::Px(0.0)),
        Token::Ident(ident) => match ident.as_ref() {
            "auto" => Some(CssLength::Auto),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a CSS color from a raw string.
pub fn parse_color(value: &str) -> Option<Color> {
    with_parser(value, parse_color_value)
}

pub(crate) fn parse_color_value(input: &mut Parser<'_, '_>) -> Option<Color> {
    // Try named colors first
    if let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        let color = match token.as_ref() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "cyan" => Color::rgb(0, 255, 255),
            "magenta" => Color::rgb(255, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        return Some(color);
    }

    // Hash tokens: #ff0000 lexes as IDHash, digit-leading ones as Hash.
    // The token type must be checked inside try_parse so the position is
    // reset when the wrong variant comes back.
    if let Ok(hash) = input.try_parse(|i| -> Result<_, ParseError<'_, ()>> {
        match i.next()? {
            Token::IDHash(h) | Token::Hash(h) => Ok(h.clone()),
            _ => Err(i.new_custom_error(())),
        }
    }) && let Some(color) = parse_hex_color(hash.as_ref())
    {
        return Some(color);
    }

    if let Ok(color) = input.try_parse(parse_rgb_function) {
        return Some(color);
    }

    None
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Color::rgba(r, g, b, a))
        }
        _ => None,
    }
}

fn parse_rgb_function<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    input.expect_function_matching("rgb")?;
    input.parse_nested_block(|input| {
        let r = parse_color_component(input)?;
        input.expect_comma()?;
        let g = parse_color_component(input)?;
        input.expect_comma()?;
        let b = parse_color_component(input)?;
        Ok(Color::rgb(r, g, b))
    })
}

fn parse_color_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number {
            int_value: Some(v), ..
        } => Ok((*v).clamp(0, 255) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Parse border values (width, style, color) in any order from a raw string.
pub fn parse_border_side(value: &str) -> Option<BorderSideValue> {
    with_parser(value, |input| {
        let mut width: Option<CssLength> = None;
        let mut style: Option<String> = None;
        let mut color: Option<Color> = None;

        for _ in 0..3 {
            if style.is_none()
                && let Ok(s) = input.try_parse(|i| {
                    let ident = i.expect_ident_cloned()?;
                    if BORDER_STYLES.contains(&ident.as_ref()) {
                        Ok(ident.to_string())
                    } else {
                        Err(i.new_custom_error::<_, ()>(()))
                    }
                })
            {
                style = Some(s);
                continue;
            }

            if color.is_none()
                && let Ok(c) = input
                    .try_parse(|i| parse_color_value(i).ok_or(i.new_custom_error::<_, ()>(())))
            {
                color = Some(c);
                continue;
            }

            if width.is_none()
                && let Ok(w) = input.try_parse(|i| {
                    parse_border_width_value(i).ok_or(i.new_custom_error::<_, ()>(()))
                })
            {
                width = Some(w);
                continue;
            }

            break;
        }

        let side = BorderSideValue { width, style, color };
        if side.is_empty() { None } else { Some(side) }
    })
}

/// Parse a single border-width value (length or keyword).
fn parse_border_width_value(input: &mut Parser<'_, '_>) -> Option<CssLength> {
    if let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        let width = match token.as_ref() {
            "thin" => CssLength::Px(1.0),
            "medium" => CssLength::Px(3.0),
            "thick" => CssLength::Px(5.0),
            _ => return None,
        };
        return Some(width);
    }
    parse_length_value(input)
}

/// Parse a 1-4 value shorthand into (top, right, bottom, left) following the
/// CSS box model expansion rules.
pub fn parse_box_shorthand<T: Copy>(
    value: &str,
    parse_one: fn(&mut Parser<'_, '_>) -> Option<T>,
) -> Option<(T, T, T, T)> {
    with_parser(value, |input| {
        let mut values = Vec::with_capacity(4);
        while values.len() < 4 {
            if let Some(v) = input.try_parse(|i| parse_one(i).ok_or(i.new_custom_error::<_, ()>(())))
                .ok()
            {
                values.push(v);
            } else {
                break;
            }
        }
        expand_shorthand_4(values)
    })
}

/// Expand 1-4 values to (top, right, bottom, left) following CSS shorthand rules.
pub fn expand_shorthand_4<T: Copy>(values: Vec<T>) -> Option<(T, T, T, T)> {
    match values.len() {
        1 => {
            let v = values[0];
            Some((v, v, v, v))
        }
        2 => {
            let (tb, lr) = (values[0], values[1]);
            Some((tb, lr, tb, lr))
        }
        3 => {
            let (t, lr, b) = (values[0], values[1], values[2]);
            Some((t, lr, b, lr))
        }
        4 => Some((values[0], values[1], values[2], values[3])),
        _ => None,
    }
}

/// Collapse four side values to the minimal 1/2/3/4-value shorthand form.
///
/// All equal → one value; top=bottom and left=right → two; left=right → three;
/// otherwise four.
pub fn collapse_shorthand_4(top: &str, right: &str, bottom: &str, left: &str) -> String {
    if top == bottom && left == right {
        if top == right {
            top.to_string()
        } else {
            format!("{top} {right}")
        }
    } else if left == right {
        format!("{top} {right} {bottom}")
    } else {
        format!("{top} {right} {bottom} {left}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_border_side_is_empty() {
        assert!(BorderSideValue::default().is_empty());
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(parse_length("16px"), Some(CssLength::Px(16.0)));
        assert_eq!(parse_length("1.5em"), Some(CssLength::Em(1.5)));
        assert_eq!(parse_length("50%"), Some(CssLength::Percent(50.0)));
        assert_eq!(parse_length("2ex"), Some(CssLength::Em(1.0)));
        assert_eq!(parse_length("auto"), Some(CssLength::Auto));
        assert_eq!(parse_length("0"), Some(CssLength::Px(0.0)));
        assert_eq!(parse_length("banana"), None);
    }

    #[test]
    fn test_pt_to_px() {
        // 12pt = 16px at the 4000/3 scaled ratio
        assert_eq!(parse_length("12pt"), Some(CssLength::Px(16.0)));
    }

    #[test]
    fn test_length_to_css() {
        assert_eq!(CssLength::Auto.to_css_string(), "auto");
        assert_eq!(CssLength::Px(0.0).to_css_string(), "0px");
        assert_eq!(CssLength::Px(16.0).to_css_string(), "16px");
        assert_eq!(CssLength::Em(1.5).to_css_string(), "1.5em");
        assert_eq!(CssLength::Percent(50.0).to_css_string(), "50%");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(parse_color("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("#0080ff"), Some(Color::rgb(0, 128, 255)));
        assert_eq!(parse_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(Color::BLACK.to_css_string(), "#000000");
        assert_eq!(Color::TRANSPARENT.to_css_string(), "transparent");
    }

    #[test]
    fn test_align_table_round_trip() {
        for align in [TextAlign::Start, TextAlign::Center, TextAlign::End] {
            for direction in [Direction::Ltr, Direction::Rtl] {
                let physical = physical_align(align, direction);
                assert_eq!(logical_align(physical, direction), align);
            }
        }
    }

    #[test]
    fn test_align_table_values() {
        assert_eq!(
            physical_align(TextAlign::Start, Direction::Rtl),
            PhysicalAlign::Right
        );
        assert_eq!(
            physical_align(TextAlign::End, Direction::Ltr),
            PhysicalAlign::Right
        );
    }

    #[test]
    fn test_border_side_parse() {
        let side = parse_border_side("1px solid red").unwrap();
        assert_eq!(side.width, Some(CssLength::Px(1.0)));
        assert_eq!(side.style.as_deref(), Some("solid"));
        assert_eq!(side.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(side.to_css_string(), "1px solid #ff0000");

        // Any order
        let side = parse_border_side("red solid thin").unwrap();
        assert_eq!(side.width, Some(CssLength::Px(1.0)));
    }

    #[test]
    fn test_collapse_shorthand() {
        assert_eq!(collapse_shorthand_4("1px", "1px", "1px", "1px"), "1px");
        assert_eq!(collapse_shorthand_4("1px", "2px", "1px", "2px"), "1px 2px");
        assert_eq!(
            collapse_shorthand_4("1px", "2px", "3px", "2px"),
            "1px 2px 3px"
        );
        assert_eq!(
            collapse_shorthand_4("1px", "2px", "3px", "4px"),
            "1px 2px 3px 4px"
        );
    }
}
