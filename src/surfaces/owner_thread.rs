//! Marshaling documents to the thread that owns a view
//!
//! UI toolkits usually allow a widget to be touched only from the thread that
//! created it. [`dispatch_channel`] splits a view into a [`SurfaceHandle`],
//! which the render thread writes to, and a [`SurfaceOwner`], which the owning
//! thread pumps from its event loop. Only the newest pending document is
//! kept; older ones are superseded before they are applied.

use super::scroll_view::{apply_document, ScrollView};
use super::DisplaySurface;
use crate::core::{CancellationToken, PipelineError, Result};
use crate::theme::Style;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Pending {
    document: Option<(String, bool)>,
    default_style: Option<Style>,
}

struct Shared {
    name: String,
    pending: Mutex<Pending>,
    disposed: AtomicBool,
}

/// Create a handle/owner pair for `view`
///
/// # Example
///
/// ```
/// use rust_rich_log::core::CancellationToken;
/// use rust_rich_log::surfaces::{dispatch_channel, DisplaySurface, ScrollPosition, ScrollView};
///
/// #[derive(Default)]
/// struct Label(String);
///
/// impl ScrollView for Label {
///     fn suspend_redraw(&mut self) {}
///     fn resume_redraw(&mut self) {}
///     fn zoom(&self) -> f32 {
///         1.0
///     }
///     fn set_zoom(&mut self, _zoom: f32) {}
///     fn scroll_position(&self) -> ScrollPosition {
///         ScrollPosition::default()
///     }
///     fn set_scroll_position(&mut self, _position: ScrollPosition) {}
///     fn scroll_to_bottom(&mut self) {}
///     fn replace_content(&mut self, document: &str) {
///         self.0 = document.to_string();
///     }
/// }
///
/// let (handle, mut owner) = dispatch_channel("label", Label::default());
/// handle.set_document("{\\rtf1 hi}".to_string(), true, &CancellationToken::new()).unwrap();
///
/// assert!(owner.pump());
/// assert_eq!(owner.view().0, "{\\rtf1 hi}");
/// ```
pub fn dispatch_channel<V: ScrollView>(
    name: impl Into<String>,
    view: V,
) -> (SurfaceHandle, SurfaceOwner<V>) {
    let shared = Arc::new(Shared {
        name: name.into(),
        pending: Mutex::new(Pending::default()),
        disposed: AtomicBool::new(false),
    });
    // One wake-up token is enough: the owner drains everything pending.
    let (wake_tx, wake_rx) = bounded(1);

    let handle = SurfaceHandle {
        shared: Arc::clone(&shared),
        wake: wake_tx,
    };
    let owner = SurfaceOwner {
        shared,
        wake: wake_rx,
        view,
    };
    (handle, owner)
}

/// Render-thread side of an owner-thread surface
#[derive(Clone)]
pub struct SurfaceHandle {
    shared: Arc<Shared>,
    wake: Sender<()>,
}

impl SurfaceHandle {
    fn notify(&self) -> Result<()> {
        match self.wake.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => Ok(()),
            Err(TrySendError::Disconnected(())) => {
                self.shared.disposed.store(true, Ordering::Release);
                Err(PipelineError::surface_closed(&self.shared.name))
            }
        }
    }
}

impl DisplaySurface for SurfaceHandle {
    fn set_document(
        &self,
        document: String,
        auto_scroll: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if self.is_disposed() {
            return Err(PipelineError::surface_closed(&self.shared.name));
        }
        if cancel.is_cancelled() {
            return Ok(());
        }

        self.shared.pending.lock().document = Some((document, auto_scroll));
        self.notify()
    }

    fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }

    fn prepare(&self, default_style: Style) -> Result<()> {
        self.shared.pending.lock().default_style = Some(default_style);
        self.notify()
    }

    fn name(&self) -> &str {
        &self.shared.name
    }
}

/// Owner-thread side: holds the view and applies pending documents to it
pub struct SurfaceOwner<V: ScrollView> {
    shared: Arc<Shared>,
    wake: Receiver<()>,
    view: V,
}

impl<V: ScrollView> SurfaceOwner<V> {
    /// Apply whatever is pending without blocking.
    ///
    /// Returns `true` if a document was applied.
    pub fn pump(&mut self) -> bool {
        while self.wake.try_recv().is_ok() {}
        self.apply_pending()
    }

    /// Wait up to `timeout` for a wake-up, then apply what is pending
    pub fn pump_timeout(&mut self, timeout: Duration) -> bool {
        match self.wake.recv_timeout(timeout) {
            Ok(()) => self.pump(),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                self.apply_pending()
            }
        }
    }

    fn apply_pending(&mut self) -> bool {
        let pending = std::mem::take(&mut *self.shared.pending.lock());

        if let Some(style) = pending.default_style {
            self.view.set_default_colors(style);
        }
        match pending.document {
            Some((document, auto_scroll)) => {
                apply_document(&mut self.view, &document, auto_scroll);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }
}

impl<V: ScrollView> Drop for SurfaceOwner<V> {
    fn drop(&mut self) {
        self.shared.disposed.store(true, Ordering::Release);
    }
}
