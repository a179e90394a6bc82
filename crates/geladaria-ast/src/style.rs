//! Layout and text styles
//!
//! A small flexbox-flavored style vocabulary. All lengths are in points.
//! Every property is optional; an unset property means "inherit / engine
//! default".

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a hex color cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color '{0}', expected #rrggbb")]
pub struct ColorParseError(pub String);

impl Color {
    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Main axis of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

/// Distribution of children along the main axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    Start,
    End,
    Center,
    SpaceBetween,
}

/// Alignment of children along the cross axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    Start,
    End,
    Center,
}

/// Absolute placement relative to the page content area
///
/// Offsets are measured inward from the named edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

impl Position {
    /// Anchor to the top-right corner
    pub fn top_right(top: f32, right: f32) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            ..Default::default()
        }
    }

    /// Anchor to the bottom-right corner
    pub fn bottom_right(bottom: f32, right: f32) -> Self {
        Self {
            bottom: Some(bottom),
            right: Some(right),
            ..Default::default()
        }
    }
}

/// Style of a node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    // Layout
    pub direction: Option<FlexDirection>,
    pub justify: Option<Justify>,
    pub align: Option<Align>,
    pub position: Option<Position>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub flex: Option<f32>,
    pub padding: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub margin_top: Option<f32>,
    pub margin_bottom: Option<f32>,

    // Box
    pub background: Option<Color>,
    pub border_radius: Option<f32>,

    // Text
    pub color: Option<Color>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
}

impl Style {
    /// An empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay children out horizontally
    pub fn row(mut self) -> Self {
        self.direction = Some(FlexDirection::Row);
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = Some(justify);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn absolute(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn flex(mut self, flex: f32) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn padding_bottom(mut self, padding: f32) -> Self {
        self.padding_bottom = Some(padding);
        self
    }

    pub fn margin_top(mut self, margin: f32) -> Self {
        self.margin_top = Some(margin);
        self
    }

    pub fn margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = Some(margin);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Whether the node is taken out of the normal flow
    pub fn is_absolute(&self) -> bool {
        self.position.is_some()
    }

    /// Whether the node lays out its children horizontally
    pub fn is_row(&self) -> bool {
        self.direction == Some(FlexDirection::Row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#64395C").unwrap();
        assert_eq!(color, Color::rgb(0x64, 0x39, 0x5c));
        assert_eq!(color.to_hex(), "#64395c");
    }

    #[test]
    fn test_color_without_hash() {
        assert_eq!(Color::from_hex("22c55e").unwrap(), Color::rgb(0x22, 0xc5, 0x5e));
    }

    #[test]
    fn test_color_invalid() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_error_message() {
        let err = Color::from_hex("#fff").unwrap_err();
        assert_eq!(err.to_string(), "invalid hex color '#fff', expected #rrggbb");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 16));
    }

    #[test]
    fn test_style_builder() {
        let style = Style::new().row().justify(Justify::SpaceBetween).margin_bottom(20.0);
        assert!(style.is_row());
        assert!(!style.is_absolute());
        assert_eq!(style.margin_bottom, Some(20.0));
    }
}
