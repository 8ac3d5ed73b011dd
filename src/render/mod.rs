//! Template compilation, token rendering and canvases

#[cfg(feature = "console")]
pub mod ansi;
pub mod canvas;
pub mod level_moniker;
pub mod renderer;
pub mod rtf_encoder;
pub mod template;
pub mod text_format;
pub mod units;

#[cfg(feature = "console")]
pub use ansi::AnsiCanvas;
pub use canvas::{Canvas, PlainTextCanvas};
pub use level_moniker::{level_moniker, LevelMonikers};
pub use renderer::TokenRenderer;
pub use rtf_encoder::{RtfEncoder, BUFFER_HIGH_WATER_MARK};
pub use template::{OutputTemplate, DEFAULT_OUTPUT_TEMPLATE};
pub use text_format::format_case;
pub use units::{RenderUnit, LINE_ENDING};
