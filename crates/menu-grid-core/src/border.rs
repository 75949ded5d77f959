/// Border descriptor codec
/// Splits a CSS border shorthand (`"<N>px <style> <#RRGGBB>"`) into the three
/// parts the editor exposes as separate controls, and recomposes it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)px").expect("valid width regex"));
static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9a-fA-F]{6}").expect("valid color regex"));
static COLOR_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color input regex"));

pub const DEFAULT_WIDTH: u32 = 1;
pub const DEFAULT_COLOR: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    /// Detection order when scanning a shorthand
    pub const ALL: [BorderStyle; 4] = [
        BorderStyle::Solid,
        BorderStyle::Dashed,
        BorderStyle::Dotted,
        BorderStyle::Double,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s.trim())
            .ok_or_else(|| format!("unknown border style: {}", s))
    }
}

/// Decoded border. `None` means the part was absent from the shorthand; the
/// accessors apply the display defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderParts {
    pub width: Option<u32>,
    pub style: Option<BorderStyle>,
    pub color: Option<String>,
}

impl BorderParts {
    pub fn new(width: u32, style: BorderStyle, color: impl Into<String>) -> Self {
        Self {
            width: Some(width),
            style: Some(style),
            color: Some(color.into()),
        }
    }

    pub fn decode(border: &str) -> Self {
        let width = WIDTH_RE
            .captures(border)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        let style = BorderStyle::ALL
            .into_iter()
            .find(|style| border.contains(style.as_str()));

        let color = COLOR_RE.find(border).map(|m| m.as_str().to_string());

        Self { width, style, color }
    }

    pub fn width(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    /// Style name, empty when none was found
    pub fn style_name(&self) -> &'static str {
        self.style.map(|s| s.as_str()).unwrap_or("")
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// General recompose path: missing parts fall back to `1px solid #000000`.
    pub fn encode(&self) -> String {
        format!(
            "{}px {} {}",
            self.width(),
            self.style.unwrap_or(BorderStyle::Solid),
            self.color()
        )
    }

    /// Colour-picker path. Unlike `encode`, a width that was never set
    /// renders as `0px`.
    pub fn encode_color_only(&self, color: &str) -> String {
        let width = match self.width {
            Some(w) => format!("{}px", w),
            None => "0px".to_string(),
        };
        format!(
            "{} {} {}",
            width,
            self.style.unwrap_or(BorderStyle::Solid),
            color
        )
    }

    /// Width edit; clearing the width selects the default.
    pub fn with_width(mut self, width: Option<u32>) -> Self {
        self.width = Some(width.unwrap_or(DEFAULT_WIDTH));
        self
    }

    pub fn with_style(mut self, style: Option<BorderStyle>) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Free-text colour entry: prefixes `#` when missing and returns the colour
/// only if it is a full `#RRGGBB` value.
pub fn normalize_color_input(text: &str) -> Option<String> {
    let text = text.trim();
    let candidate = if !text.is_empty() && !text.starts_with('#') {
        format!("#{}", text)
    } else {
        text.to_string()
    };

    COLOR_INPUT_RE.is_match(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_shorthand() {
        let parts = BorderParts::decode("2px dashed #1a2B3c");
        assert_eq!(parts.width(), 2);
        assert_eq!(parts.style, Some(BorderStyle::Dashed));
        assert_eq!(parts.color(), "#1a2B3c");
    }

    #[test]
    fn test_decode_defaults() {
        let parts = BorderParts::decode("");
        assert_eq!(parts.width(), 1);
        assert_eq!(parts.style_name(), "");
        assert_eq!(parts.color(), "#000000");

        let parts = BorderParts::decode("0px");
        assert_eq!(parts.width, Some(0));
        assert_eq!(parts.style, None);
    }

    #[test]
    fn test_decode_ignores_short_hex() {
        let parts = BorderParts::decode("1px solid #fff");
        assert_eq!(parts.color, None);
        assert_eq!(parts.color(), "#000000");
    }

    #[test]
    fn test_decode_picks_first_known_style() {
        // "solid" is checked before "double"
        let parts = BorderParts::decode("1px double solid #000000");
        assert_eq!(parts.style, Some(BorderStyle::Solid));
    }

    #[test]
    fn test_decode_reads_back_every_style() {
        for width in 0..=5 {
            for style in BorderStyle::ALL {
                let encoded = BorderParts::new(width, style, "#a1B2c3").encode();
                assert_eq!(BorderParts::decode(&encoded), BorderParts::new(width, style, "#a1B2c3"));
            }
        }
    }

    #[test]
    fn test_encode_keeps_decoded_parts() {
        let parts = BorderParts::decode("0px dotted #FFFFFF");
        assert_eq!(parts, BorderParts::new(0, BorderStyle::Dotted, "#FFFFFF"));
        assert_eq!(parts.with_color("#a1B2c3").encode(), "0px dotted #a1B2c3");
    }

    #[test]
    fn test_encode_fills_missing_parts() {
        assert_eq!(BorderParts::default().encode(), "1px solid #000000");
        let parts = BorderParts::decode("3px").with_style(Some(BorderStyle::Dotted));
        assert_eq!(parts.encode(), "3px dotted #000000");
    }

    #[test]
    fn test_color_only_path_uses_zero_width() {
        assert_eq!(
            BorderParts::decode("").encode_color_only("#123456"),
            "0px solid #123456"
        );
        assert_eq!(
            BorderParts::decode("4px double #000000").encode_color_only("#123456"),
            "4px double #123456"
        );
    }

    #[test]
    fn test_cleared_width_selects_default() {
        let parts = BorderParts::decode("5px solid #000000").with_width(None);
        assert_eq!(parts.encode(), "1px solid #000000");
    }

    #[test]
    fn test_normalize_color_input() {
        assert_eq!(normalize_color_input("ff0000"), Some("#ff0000".to_string()));
        assert_eq!(normalize_color_input("#AbCdEf"), Some("#AbCdEf".to_string()));
        assert_eq!(normalize_color_input("#ff00"), None);
        assert_eq!(normalize_color_input("zzzzzz"), None);
        assert_eq!(normalize_color_input(""), None);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("double".parse::<BorderStyle>(), Ok(BorderStyle::Double));
        assert!("groove".parse::<BorderStyle>().is_err());
    }
}
