//! Color values: parsing to 8-bit RGBA and the canonical color spelling.
//!
//! Parsing is delegated to `csscolorparser`, which understands hex forms
//! (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), functional notations (`rgb()`,
//! `rgba()`, `hsl()`, `hsla()`, `hwb()`) and named colors.

use std::fmt;

use csscolorparser::Color;

/// A color as four 8-bit channels. Alpha 255 is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// An opaque color.
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Parse any CSS color spelling. Returns `None` for non-colors.
    pub fn parse(input: &str) -> Option<Self> {
        let parsed: Color = input.parse().ok()?;
        let [red, green, blue, alpha] = parsed.to_rgba8();
        Some(Self {
            red,
            green,
            blue,
            alpha,
        })
    }
}

/// Canonical spelling: `rgba(18, 52, 86, 1)`. Alpha is printed as a decimal
/// in `0..=1` with at most three fractional digits.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            format_alpha(self.alpha)
        )
    }
}

fn format_alpha(alpha: u8) -> String {
    match alpha {
        255 => "1".to_string(),
        0 => "0".to_string(),
        a => {
            let text = format!("{:.3}", f32::from(a) / 255.0);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Functions whose whole call denotes a color.
pub fn is_color_function(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "rgb" | "rgba" | "hsl" | "hsla" | "hwb"
    )
}

/// Parse a single value word as a color.
///
/// Hash words are parsed as hex colors. Bare words are only considered when
/// they are purely alphabetic and cannot be read as hex digits, so that
/// keywords such as `solid` or numbers such as `100` never turn into colors.
pub fn parse_color_word(word: &str) -> Option<Rgba> {
    if word.starts_with('#') {
        return Rgba::parse(word);
    }
    let alphabetic = !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic());
    if alphabetic && !word.chars().all(|c| c.is_ascii_hexdigit()) {
        return Rgba::parse(word);
    }
    None
}

/// Properties whose values are, or may contain, colors, including
/// gradients and filter functions.
static COLOR_PROPERTIES: &[&str] = &[
    "accent-color",
    "background",
    "background-color",
    "background-image",
    "border",
    "border-block",
    "border-block-color",
    "border-block-end",
    "border-block-end-color",
    "border-block-start",
    "border-block-start-color",
    "border-bottom",
    "border-bottom-color",
    "border-color",
    "border-image",
    "border-image-source",
    "border-inline",
    "border-inline-color",
    "border-inline-end",
    "border-inline-end-color",
    "border-inline-start",
    "border-inline-start-color",
    "border-left",
    "border-left-color",
    "border-right",
    "border-right-color",
    "border-top",
    "border-top-color",
    "box-shadow",
    "caret-color",
    "color",
    "column-rule",
    "column-rule-color",
    "fill",
    "filter",
    "flood-color",
    "lighting-color",
    "list-style-image",
    "mask-image",
    "outline",
    "outline-color",
    "stop-color",
    "stroke",
    "text-decoration",
    "text-decoration-color",
    "text-emphasis-color",
    "text-shadow",
];

/// Returns `true` if values of this (lowercase) property may contain colors.
pub fn is_color_property(name: &str) -> bool {
    COLOR_PROPERTIES.binary_search(&name).is_ok()
}
