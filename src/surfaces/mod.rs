//! Display surfaces that receive rendered documents

#[cfg(feature = "async-surface")]
pub mod async_surface;
pub mod owner_thread;
pub mod recording;
pub mod scroll_view;

#[cfg(feature = "async-surface")]
pub use async_surface::{AsyncDisplaySurface, AsyncSurfaceBridge};
pub use owner_thread::{dispatch_channel, SurfaceHandle, SurfaceOwner};
pub use recording::{Delivery, RecordingSurface};
pub use scroll_view::{apply_document, ScrollPosition, ScrollView};

use crate::core::{CancellationToken, Result};
use crate::theme::Style;

/// Destination for rendered documents.
///
/// Called from the render thread. Implementations that must update their view
/// on a specific thread marshal the document there (see [`dispatch_channel`]).
pub trait DisplaySurface: Send + Sync {
    /// Replace the displayed document.
    ///
    /// With `auto_scroll` the view scrolls to the end after the swap;
    /// otherwise the previous scroll position is kept. Zoom is always kept.
    fn set_document(
        &self,
        document: String,
        auto_scroll: bool,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// A disposed surface is skipped instead of receiving documents
    fn is_disposed(&self) -> bool {
        false
    }

    /// Apply the theme's default colors before the first document
    fn prepare(&self, _default_style: Style) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
