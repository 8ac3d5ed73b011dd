//! Themes: complete mappings from style tokens to colors

use super::color::Color;
use super::presets::ThemePreset;
use super::style::{Style, StyleToken};
use crate::core::{PipelineError, Result};
use crate::render::Canvas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolves every [`StyleToken`] to a [`Style`].
///
/// A theme is validated when it is built: every token must have a style, so
/// lookups during rendering cannot fail.
///
/// # Example
///
/// ```
/// use rust_rich_log::theme::{Style, StyleToken, Theme, ThemeColors};
///
/// let plain = Style::new(ThemeColors::WHITE, ThemeColors::BLACK);
/// let theme = Theme::builder(plain)
///     .fill(plain)
///     .style(StyleToken::LevelError, Style::new(ThemeColors::WHITE, ThemeColors::RED))
///     .build()
///     .unwrap();
///
/// assert_eq!(theme.style(StyleToken::LevelError).background, ThemeColors::RED);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThemeConfig", into = "ThemeDefinition")]
pub struct Theme {
    default_style: Style,
    styles: [Style; StyleToken::COUNT],
}

impl Theme {
    pub(crate) const fn from_table(
        default_style: Style,
        styles: [Style; StyleToken::COUNT],
    ) -> Self {
        Self {
            default_style,
            styles,
        }
    }

    pub fn builder(default_style: Style) -> ThemeBuilder {
        ThemeBuilder::new(default_style)
    }

    /// Build a theme from a token map, rejecting maps with missing tokens
    pub fn from_styles(default_style: Style, styles: &BTreeMap<StyleToken, Style>) -> Result<Self> {
        let mut builder = ThemeBuilder::new(default_style);
        for (token, style) in styles {
            builder = builder.style(*token, *style);
        }
        builder.build()
    }

    pub fn default_style(&self) -> Style {
        self.default_style
    }

    #[inline]
    pub fn style(&self, token: StyleToken) -> Style {
        self.styles[token.index()]
    }

    /// Every color the theme uses: default pair first, then each token's pair
    /// in token order. Duplicates are not removed.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        std::iter::once(self.default_style)
            .chain(self.styles.iter().copied())
            .flat_map(|style| [style.foreground, style.background])
    }

    /// Append `value` in the style of `token`, then return the canvas to the
    /// default style.
    pub fn render(&self, canvas: &mut dyn Canvas, token: StyleToken, value: &str) {
        let style = self.style(token);

        let end = canvas.text_length();
        canvas.set_selection(end, 0);
        canvas.set_selection_color(style.foreground);
        canvas.set_selection_back_color(style.background);
        canvas.append_text(value);

        canvas.set_selection_color(self.default_style.foreground);
        canvas.set_selection_back_color(self.default_style.background);
    }
}

impl Default for Theme {
    fn default() -> Self {
        ThemePreset::Literate.theme()
    }
}

/// Incremental construction of a [`Theme`]
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    default_style: Style,
    styles: [Option<Style>; StyleToken::COUNT],
}

impl ThemeBuilder {
    pub fn new(default_style: Style) -> Self {
        Self {
            default_style,
            styles: [None; StyleToken::COUNT],
        }
    }

    #[must_use]
    pub fn style(mut self, token: StyleToken, style: Style) -> Self {
        self.styles[token.index()] = Some(style);
        self
    }

    /// Give every token that has no style yet the given one
    #[must_use]
    pub fn fill(mut self, style: Style) -> Self {
        for slot in self.styles.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(style);
        }
        self
    }

    pub fn build(self) -> Result<Theme> {
        let mut styles = [self.default_style; StyleToken::COUNT];
        for token in StyleToken::ALL {
            styles[token.index()] =
                self.styles[token.index()].ok_or(PipelineError::MissingStyle { token })?;
        }
        Ok(Theme::from_table(self.default_style, styles))
    }
}

/// Serialized form of a theme: an explicit token table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub default: Style,
    pub styles: BTreeMap<StyleToken, Style>,
}

/// Accepted configuration forms: a preset name or an explicit table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    Preset(ThemePreset),
    Custom(ThemeDefinition),
}

impl TryFrom<ThemeConfig> for Theme {
    type Error = PipelineError;

    fn try_from(config: ThemeConfig) -> Result<Self> {
        match config {
            ThemeConfig::Preset(preset) => Ok(preset.theme()),
            ThemeConfig::Custom(definition) => {
                Theme::from_styles(definition.default, &definition.styles)
            }
        }
    }
}

impl From<Theme> for ThemeDefinition {
    fn from(theme: Theme) -> Self {
        Self {
            default: theme.default_style,
            styles: StyleToken::ALL
                .iter()
                .map(|token| (*token, theme.style(*token)))
                .collect(),
        }
    }
}
