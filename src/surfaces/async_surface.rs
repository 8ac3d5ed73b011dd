//! Bridge from the render thread to an async display surface

use super::DisplaySurface;
use crate::core::{CancellationToken, PipelineError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Surface whose update is asynchronous, e.g. a web view or a remote client
///
/// # Example
///
/// ```no_run
/// use rust_rich_log::core::Result;
/// use rust_rich_log::surfaces::AsyncDisplaySurface;
/// use async_trait::async_trait;
///
/// struct Browser;
///
/// #[async_trait]
/// impl AsyncDisplaySurface for Browser {
///     async fn set_document(&self, document: String, auto_scroll: bool) -> Result<()> {
///         // push the document to the client
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "browser"
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncDisplaySurface: Send + Sync + 'static {
    async fn set_document(&self, document: String, auto_scroll: bool) -> Result<()>;

    fn is_disposed(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}

/// [`DisplaySurface`] that forwards documents to a task driving an
/// [`AsyncDisplaySurface`]. Pending documents are coalesced: the task always
/// applies the newest one.
pub struct AsyncSurfaceBridge<S: AsyncDisplaySurface> {
    surface: Arc<S>,
    sender: watch::Sender<Option<(String, bool)>>,
}

impl<S: AsyncDisplaySurface> AsyncSurfaceBridge<S> {
    /// Spawn the forwarding task on `runtime`
    pub fn spawn(surface: S, runtime: &tokio::runtime::Handle) -> (Self, JoinHandle<()>) {
        let surface = Arc::new(surface);
        let (sender, mut receiver) = watch::channel(None::<(String, bool)>);

        let task_surface = Arc::clone(&surface);
        let task = runtime.spawn(async move {
            while receiver.changed().await.is_ok() {
                let pending = receiver.borrow_and_update().clone();
                let Some((document, auto_scroll)) = pending else {
                    continue;
                };
                if task_surface.is_disposed() {
                    break;
                }
                if let Err(e) = task_surface.set_document(document, auto_scroll).await {
                    tracing::warn!(
                        surface = task_surface.name(),
                        error = %e,
                        "async surface rejected document"
                    );
                }
            }
        });

        (Self { surface, sender }, task)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: AsyncDisplaySurface> DisplaySurface for AsyncSurfaceBridge<S> {
    fn set_document(
        &self,
        document: String,
        auto_scroll: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Ok(());
        }
        self.sender
            .send(Some((document, auto_scroll)))
            .map_err(|_| PipelineError::surface_closed(self.surface.name()))
    }

    fn is_disposed(&self) -> bool {
        self.surface.is_disposed() || self.sender.is_closed()
    }

    fn name(&self) -> &str {
        self.surface.name()
    }
}
