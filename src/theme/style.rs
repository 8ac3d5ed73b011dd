//! Semantic style tokens and the color pairs they resolve to

use super::color::Color;
use crate::core::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role of a run of rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleToken {
    Text,
    SecondaryText,
    TertiaryText,
    Invalid,
    Null,
    Name,
    String,
    Number,
    Boolean,
    Scalar,
    LevelVerbose,
    LevelDebug,
    LevelInformation,
    LevelWarning,
    LevelError,
    LevelFatal,
}

impl StyleToken {
    pub const COUNT: usize = 16;

    /// Every token in declaration order
    pub const ALL: [StyleToken; StyleToken::COUNT] = [
        StyleToken::Text,
        StyleToken::SecondaryText,
        StyleToken::TertiaryText,
        StyleToken::Invalid,
        StyleToken::Null,
        StyleToken::Name,
        StyleToken::String,
        StyleToken::Number,
        StyleToken::Boolean,
        StyleToken::Scalar,
        StyleToken::LevelVerbose,
        StyleToken::LevelDebug,
        StyleToken::LevelInformation,
        StyleToken::LevelWarning,
        StyleToken::LevelError,
        StyleToken::LevelFatal,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Style token a severity level renders with
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Verbose => StyleToken::LevelVerbose,
            LogLevel::Debug => StyleToken::LevelDebug,
            LogLevel::Information => StyleToken::LevelInformation,
            LogLevel::Warning => StyleToken::LevelWarning,
            LogLevel::Error => StyleToken::LevelError,
            LogLevel::Fatal => StyleToken::LevelFatal,
        }
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Foreground/background color pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
}

impl Style {
    #[must_use]
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, token) in StyleToken::ALL.iter().enumerate() {
            assert_eq!(token.index(), i);
        }
    }

    #[test]
    fn test_level_tokens_are_distinct() {
        let tokens: std::collections::HashSet<_> =
            LogLevel::ALL.iter().map(|l| StyleToken::for_level(*l)).collect();
        assert_eq!(tokens.len(), LogLevel::ALL.len());
    }

    #[test]
    fn test_display_matches_variant_name() {
        assert_eq!(StyleToken::LevelInformation.to_string(), "LevelInformation");
    }
}
