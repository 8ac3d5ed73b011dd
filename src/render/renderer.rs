//! Renderer trait for turning entries into styled text

use super::canvas::Canvas;
use crate::core::LogEntry;
use crate::theme::Theme;

/// Renders one entry onto a canvas.
///
/// Implementations are shared with the render thread, so they must be
/// stateless per call. A canvas is never shared between concurrent calls.
pub trait TokenRenderer: Send + Sync {
    fn render(&self, entry: &LogEntry, canvas: &mut dyn Canvas);

    /// Theme whose colors seed the encoder's color table
    fn theme(&self) -> &Theme;
}
