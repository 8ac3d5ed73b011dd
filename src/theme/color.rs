//! RGB colors used by themes and the RTF color table

use crate::core::{PipelineError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(value: &str) -> Result<Self> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PipelineError::invalid_color(value));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PipelineError::invalid_color(value))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Palette shared by the built-in themes
pub struct ThemeColors;

impl ThemeColors {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const DARK_BLUE: Color = Color::rgb(0x00, 0x00, 0x70);
    pub const DARK_GREEN: Color = Color::rgb(0x00, 0x4D, 0x00);
    pub const DARK_CYAN: Color = Color::rgb(0x00, 0x52, 0x52);
    pub const DARK_MAGENTA: Color = Color::rgb(0x80, 0x00, 0x80);
    pub const DARK_YELLOW: Color = Color::rgb(0x57, 0x57, 0x00);
    pub const GRAY: Color = Color::rgb(0xC2, 0xC2, 0xC2);
    pub const DARK_GRAY: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const LIGHT_BLUE: Color = Color::rgb(0x8A, 0x8A, 0xFF);
    pub const GREEN: Color = Color::rgb(0x00, 0xE6, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xF5, 0xF5);
    pub const RED: Color = Color::rgb(0xB3, 0x00, 0x00);
    pub const MAGENTA: Color = Color::rgb(0xFF, 0x75, 0xFF);
    pub const YELLOW: Color = Color::rgb(0xF5, 0xF5, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const DARK_BACKGROUND: Color = Color::rgb(0x1E, 0x1E, 0x1E);
    pub const LIGHT_BACKGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);
}
