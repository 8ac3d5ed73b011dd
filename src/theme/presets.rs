//! Built-in themes
//!
//! Presets are built on demand; nothing is cached in statics.

use super::color::ThemeColors as C;
use super::style::{Style, StyleToken};
use super::theme::Theme;
use crate::core::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the built-in themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemePreset {
    #[default]
    Literate,
    Grayscale,
    Colored,
    Luminous,
    EnhancedDark,
    EnhancedLight,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 6] = [
        ThemePreset::Literate,
        ThemePreset::Grayscale,
        ThemePreset::Colored,
        ThemePreset::Luminous,
        ThemePreset::EnhancedDark,
        ThemePreset::EnhancedLight,
    ];

    pub fn theme(self) -> Theme {
        match self {
            ThemePreset::Literate => literate(),
            ThemePreset::Grayscale => grayscale(),
            ThemePreset::Colored => colored(),
            ThemePreset::Luminous => luminous(),
            ThemePreset::EnhancedDark => enhanced_dark(),
            ThemePreset::EnhancedLight => enhanced_light(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreset::Literate => "Literate",
            ThemePreset::Grayscale => "Grayscale",
            ThemePreset::Colored => "Colored",
            ThemePreset::Luminous => "Luminous",
            ThemePreset::EnhancedDark => "EnhancedDark",
            ThemePreset::EnhancedLight => "EnhancedLight",
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreset {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        ThemePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PipelineError::config("theme", format!("unknown theme preset '{}'", s)))
    }
}

const fn s(foreground: crate::theme::Color, background: crate::theme::Color) -> Style {
    Style::new(foreground, background)
}

/// Rows are in [`StyleToken::ALL`] order
const fn table(default_style: Style, styles: [Style; StyleToken::COUNT]) -> Theme {
    Theme::from_table(default_style, styles)
}

pub fn literate() -> Theme {
    let bg = C::BLACK;
    table(
        s(C::WHITE, bg),
        [
            s(C::WHITE, bg),      // Text
            s(C::GRAY, bg),       // SecondaryText
            s(C::GRAY, bg),       // TertiaryText
            s(C::YELLOW, bg),     // Invalid
            s(C::LIGHT_BLUE, bg), // Null
            s(C::GRAY, bg),       // Name
            s(C::CYAN, bg),       // String
            s(C::MAGENTA, bg),    // Number
            s(C::LIGHT_BLUE, bg), // Boolean
            s(C::GREEN, bg),      // Scalar
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::WHITE, bg),
            s(C::YELLOW, bg),
            s(C::WHITE, C::RED),
            s(C::WHITE, C::RED),
        ],
    )
}

pub fn grayscale() -> Theme {
    let bg = C::BLACK;
    table(
        s(C::WHITE, bg),
        [
            s(C::WHITE, bg),
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::WHITE, C::DARK_GRAY),
            s(C::WHITE, bg),
            s(C::GRAY, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::WHITE, bg),
            s(C::WHITE, C::DARK_GRAY),
            s(C::BLACK, C::WHITE),
            s(C::BLACK, C::WHITE),
        ],
    )
}

pub fn colored() -> Theme {
    let bg = C::BLACK;
    table(
        s(C::GRAY, bg),
        [
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::YELLOW, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::WHITE, bg),
            s(C::GRAY, C::DARK_GRAY),
            s(C::WHITE, C::DARK_GRAY),
            s(C::WHITE, C::BLUE),
            s(C::DARK_GRAY, C::YELLOW),
            s(C::WHITE, C::RED),
            s(C::WHITE, C::RED),
        ],
    )
}

pub fn luminous() -> Theme {
    light_palette(C::WHITE)
}

pub fn enhanced_dark() -> Theme {
    let bg = C::DARK_BACKGROUND;
    table(
        s(C::WHITE, bg),
        [
            s(C::WHITE, bg),
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::YELLOW, bg),
            s(C::LIGHT_BLUE, bg),
            s(C::GRAY, bg),
            s(C::CYAN, bg),
            s(C::MAGENTA, bg),
            s(C::LIGHT_BLUE, bg),
            s(C::GREEN, bg),
            s(C::GRAY, bg),
            s(C::GRAY, bg),
            s(C::WHITE, bg),
            s(C::YELLOW, bg),
            s(C::WHITE, C::RED),
            s(C::WHITE, C::RED),
        ],
    )
}

pub fn enhanced_light() -> Theme {
    light_palette(C::LIGHT_BACKGROUND)
}

// Luminous and EnhancedLight share their foregrounds
fn light_palette(bg: crate::theme::Color) -> Theme {
    table(
        s(C::BLACK, bg),
        [
            s(C::BLACK, bg),
            s(C::DARK_GRAY, bg),
            s(C::DARK_GRAY, bg),
            s(C::WHITE, C::RED),
            s(C::DARK_BLUE, bg),
            s(C::DARK_MAGENTA, bg),
            s(C::DARK_GREEN, bg),
            s(C::DARK_CYAN, bg),
            s(C::DARK_YELLOW, bg),
            s(C::DARK_CYAN, bg),
            s(C::DARK_GRAY, bg),
            s(C::DARK_BLUE, bg),
            s(C::DARK_GREEN, bg),
            s(C::BLACK, C::YELLOW),
            s(C::WHITE, C::RED),
            s(C::WHITE, C::RED),
        ],
    )
}
