//! Colors, style tokens and themes

pub mod color;
pub mod presets;
pub mod style;
#[allow(clippy::module_inception)]
pub mod theme;

pub use color::{Color, ThemeColors};
pub use presets::ThemePreset;
pub use style::{Style, StyleToken};
pub use theme::{Theme, ThemeBuilder, ThemeConfig, ThemeDefinition};
