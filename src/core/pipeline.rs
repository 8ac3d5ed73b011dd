//! The rendering pipeline: producers, ring buffer and render thread
//!
//! Producers call [`PipelineHandle::post`] from any thread. Entries go into a
//! bounded ring buffer and raise a signal. A dedicated render thread wakes on
//! the signal, waits out the rest of the flush interval so bursts coalesce,
//! re-renders the whole buffer into an RTF document and hands it to the
//! display surface.

use super::buffer::LogRingBuffer;
use super::config::PipelineConfig;
use super::error::{PipelineError, Result};
use super::exception::ExceptionInfo;
use super::field_value::FieldValue;
use super::log_entry::{truncate_message, LogEntry};
use super::log_level::LogLevel;
use super::metrics::PipelineMetrics;
use super::signal::{CancellationToken, Signal};
use crate::render::{OutputTemplate, RtfEncoder, TokenRenderer};
use crate::surfaces::DisplaySurface;
use crate::theme::Theme;
use chrono::{DateTime, FixedOffset, Locale};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Name of the render thread
pub const RENDER_THREAD_NAME: &str = "rich-log-render";

struct Shared {
    buffer: LogRingBuffer<Arc<LogEntry>>,
    signal: Signal,
    cancel: CancellationToken,
    renderer: RwLock<Arc<dyn TokenRenderer>>,
    surface: Arc<dyn DisplaySurface>,
    metrics: PipelineMetrics,
    stopped: AtomicBool,
    auto_scroll: bool,
    max_message_length: usize,
    flush_interval: Duration,
    locale: Option<Locale>,
}

/// Cheap, cloneable producer side of a [`LogPipeline`]
///
/// Handles stay valid after the pipeline shuts down; posts are then ignored.
#[derive(Clone)]
pub struct PipelineHandle {
    shared: Arc<Shared>,
}

impl PipelineHandle {
    /// Append an entry and wake the render thread. Never blocks on the display.
    pub fn post(&self, mut entry: LogEntry) {
        let shared = &self.shared;
        if shared.stopped.load(Ordering::Acquire) {
            return;
        }

        if truncate_message(&mut entry.message, shared.max_message_length) {
            shared.metrics.record_truncated();
        }

        if shared.buffer.add(Arc::new(entry)) {
            shared.metrics.record_evicted();
        }
        shared.metrics.record_posted();
        shared.signal.set();
    }

    /// Build an entry from its parts and post it
    pub fn post_record(
        &self,
        level: LogLevel,
        timestamp: DateTime<FixedOffset>,
        category: impl Into<String>,
        message: impl Into<String>,
        exception: Option<ExceptionInfo>,
        parameters: Vec<(String, FieldValue)>,
    ) {
        let mut entry = LogEntry::new(level, category, message).with_timestamp(timestamp);
        entry.exception = exception;
        entry.parameters = parameters;
        self.post(entry);
    }

    pub fn log(&self, level: LogLevel, category: impl Into<String>, message: impl Into<String>) {
        self.post(LogEntry::new(level, category, message));
    }

    #[inline]
    pub fn verbose(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Verbose, category, message);
    }

    #[inline]
    pub fn debug(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Debug, category, message);
    }

    #[inline]
    pub fn info(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Information, category, message);
    }

    #[inline]
    pub fn warn(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Warning, category, message);
    }

    #[inline]
    pub fn error(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Error, category, message);
    }

    #[inline]
    pub fn fatal(&self, category: impl Into<String>, message: impl Into<String>) {
        self.log(LogLevel::Fatal, category, message);
    }

    /// Hide everything on screen; [`restore`](Self::restore) brings it back
    pub fn clear(&self) {
        if self.is_stopped() {
            return;
        }
        self.shared.buffer.clear();
        self.shared.signal.set();
    }

    /// Undo the last [`clear`](Self::clear). Returns `false` if there was
    /// nothing to restore.
    pub fn restore(&self) -> bool {
        if self.is_stopped() {
            return false;
        }
        let restored = self.shared.buffer.restore();
        self.shared.signal.set();
        restored
    }

    /// Compile a new template and theme and use them from the next render on
    pub fn reconfigure(&self, template: &str, theme: Theme) -> Result<()> {
        let template = OutputTemplate::compile(template, Arc::new(theme), self.shared.locale)?;
        self.set_renderer(Arc::new(template))
    }

    /// Replace the renderer; the buffer keeps its entries
    pub fn set_renderer(&self, renderer: Arc<dyn TokenRenderer>) -> Result<()> {
        if self.is_stopped() {
            return Err(PipelineError::PipelineStopped);
        }
        self.shared.surface.prepare(renderer.theme().default_style())?;
        *self.shared.renderer.write() = renderer;
        self.shared.signal.set();
        Ok(())
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.shared.metrics
    }

    /// Entries currently visible
    pub fn len(&self) -> usize {
        self.shared.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.buffer.is_empty()
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::Acquire)
    }
}

/// Owns the render thread. Dropping the pipeline shuts it down.
///
/// # Example
///
/// ```
/// use rust_rich_log::core::{LogPipeline, PipelineConfig};
/// use rust_rich_log::surfaces::RecordingSurface;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let surface = Arc::new(RecordingSurface::new());
/// let mut pipeline = LogPipeline::new(surface.clone(), PipelineConfig::default()).unwrap();
///
/// pipeline.info("App", "started");
/// assert!(surface.wait_for_deliveries(1, Duration::from_secs(2)));
/// assert!(surface.last_document().unwrap().contains("started"));
///
/// assert!(pipeline.shutdown(Duration::from_secs(1)));
/// ```
pub struct LogPipeline {
    handle: PipelineHandle,
    worker: Option<thread::JoinHandle<()>>,
    shutdown_timeout: Duration,
}

impl LogPipeline {
    /// Start a pipeline rendering with the configured template and theme
    pub fn new(surface: Arc<dyn DisplaySurface>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let template = OutputTemplate::compile(
            &config.output_template,
            Arc::new(config.theme.clone()),
            config.locale,
        )?;
        Self::with_renderer(surface, config, Arc::new(template))
    }

    /// Start a pipeline with a custom renderer; the config's template and
    /// theme are ignored.
    pub fn with_renderer(
        surface: Arc<dyn DisplaySurface>,
        config: PipelineConfig,
        renderer: Arc<dyn TokenRenderer>,
    ) -> Result<Self> {
        config.validate()?;
        surface.prepare(renderer.theme().default_style())?;

        let shared = Arc::new(Shared {
            buffer: LogRingBuffer::new(config.max_log_lines),
            signal: Signal::new(),
            cancel: CancellationToken::new(),
            renderer: RwLock::new(renderer),
            surface,
            metrics: PipelineMetrics::new(),
            stopped: AtomicBool::new(false),
            auto_scroll: config.auto_scroll,
            max_message_length: config.max_message_length,
            flush_interval: config.flush_interval,
            locale: config.locale,
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || render_loop(worker_shared))
            .map_err(PipelineError::SpawnError)?;

        Ok(Self {
            handle: PipelineHandle { shared },
            worker: Some(worker),
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    /// A producer handle that can be sent to other threads
    pub fn handle(&self) -> PipelineHandle {
        self.handle.clone()
    }

    #[inline]
    pub fn post(&self, entry: LogEntry) {
        self.handle.post(entry);
    }

    pub fn log(&self, level: LogLevel, category: impl Into<String>, message: impl Into<String>) {
        self.handle.log(level, category, message);
    }

    pub fn verbose(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.verbose(category, message);
    }

    pub fn debug(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.debug(category, message);
    }

    pub fn info(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.info(category, message);
    }

    pub fn warn(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.warn(category, message);
    }

    pub fn error(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.error(category, message);
    }

    pub fn fatal(&self, category: impl Into<String>, message: impl Into<String>) {
        self.handle.fatal(category, message);
    }

    pub fn clear(&self) {
        self.handle.clear();
    }

    pub fn restore(&self) -> bool {
        self.handle.restore()
    }

    pub fn reconfigure(&self, template: &str, theme: Theme) -> Result<()> {
        self.handle.reconfigure(template, theme)
    }

    pub fn set_renderer(&self, renderer: Arc<dyn TokenRenderer>) -> Result<()> {
        self.handle.set_renderer(renderer)
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        self.handle.metrics()
    }

    pub fn len(&self) -> usize {
        self.handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Stop the render thread, waiting at most `timeout` for it to finish.
    ///
    /// A render in progress is abandoned without delivery. Returns `true` if
    /// the thread exited cleanly in time. Calling this again is a no-op that
    /// returns `true`.
    ///
    /// When the pipeline is dropped without calling `shutdown()`, the
    /// configured shutdown timeout
    /// ([`DEFAULT_SHUTDOWN_TIMEOUT`](super::config::DEFAULT_SHUTDOWN_TIMEOUT) unless set) is
    /// used.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let Some(worker) = self.worker.take() else {
            return true;
        };

        let shared = &self.handle.shared;
        shared.stopped.store(true, Ordering::Release);
        shared.cancel.cancel();
        shared.signal.set();

        let start = Instant::now();
        loop {
            if worker.is_finished() {
                return match worker.join() {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!(panic = ?e, "render thread panicked");
                        false
                    }
                };
            }

            if start.elapsed() >= timeout {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "render thread did not stop within timeout"
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for LogPipeline {
    fn drop(&mut self) {
        let timeout = self.shutdown_timeout;
        self.shutdown(timeout);
    }
}

impl std::fmt::Debug for LogPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPipeline")
            .field("buffer", &self.handle.shared.buffer)
            .field("surface", &self.handle.shared.surface.name())
            .field("running", &self.worker.is_some())
            .finish()
    }
}

fn same_renderer(a: &Arc<dyn TokenRenderer>, b: &Arc<dyn TokenRenderer>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

fn render_loop(shared: Arc<Shared>) {
    let mut renderer = Arc::clone(&*shared.renderer.read());
    let mut encoder = RtfEncoder::new(renderer.theme());
    let mut snapshot: Vec<Arc<LogEntry>> = Vec::with_capacity(shared.buffer.capacity());
    let mut last_flush: Option<Instant> = None;

    tracing::debug!(capacity = shared.buffer.capacity(), "render loop started");

    loop {
        shared.signal.wait();
        if shared.cancel.is_cancelled() {
            break;
        }

        // Debounce: wait out the rest of the interval so a burst renders once
        if let Some(remaining) = last_flush
            .map(|at| at.elapsed())
            .and_then(|elapsed| shared.flush_interval.checked_sub(elapsed))
        {
            if shared.cancel.wait_timeout(remaining) {
                break;
            }
        }

        shared.signal.reset();

        let current = Arc::clone(&*shared.renderer.read());
        if !same_renderer(&current, &renderer) {
            renderer = current;
            encoder = RtfEncoder::new(renderer.theme());
        }

        shared.buffer.take_snapshot(&mut snapshot);
        let rendered = snapshot.len();
        encoder.clear();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            for entry in &snapshot {
                renderer.render(entry, &mut encoder);
            }
        }));
        snapshot.clear();

        if let Err(panic_info) = outcome {
            let message = panic_info
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic_info.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(panic = %message, "renderer panicked; render skipped");
            shared.metrics.record_skipped_delivery();
            encoder = RtfEncoder::new(renderer.theme());
            last_flush = Some(Instant::now());
            continue;
        }

        if shared.cancel.is_cancelled() {
            shared.metrics.record_skipped_delivery();
            break;
        }

        if shared.surface.is_disposed() {
            tracing::debug!(
                surface = shared.surface.name(),
                "surface disposed; delivery skipped"
            );
            shared.metrics.record_skipped_delivery();
            last_flush = Some(Instant::now());
            continue;
        }

        let document = encoder.document();
        match shared.surface.set_document(document, shared.auto_scroll, &shared.cancel) {
            Ok(()) => {
                shared.metrics.record_flush(rendered);
            }
            Err(e) => {
                shared.metrics.record_failed_delivery();
                tracing::warn!(
                    surface = shared.surface.name(),
                    error = %e,
                    "document delivery failed"
                );
            }
        }
        last_flush = Some(Instant::now());
    }

    tracing::debug!("render loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;
    use crate::surfaces::RecordingSurface;

    const WAIT: Duration = Duration::from_secs(5);

    fn start(config: PipelineConfig) -> (LogPipeline, Arc<RecordingSurface>) {
        let surface = Arc::new(RecordingSurface::new());
        let pipeline = LogPipeline::new(surface.clone(), config).unwrap();
        (pipeline, surface)
    }

    fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < WAIT {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_post_is_rendered_and_delivered() {
        let (mut pipeline, surface) =
            start(PipelineConfig::default().with_template("{Level:u3} {Message}"));
        pipeline.warn("Disk", "disk full");

        assert!(wait_until(|| surface
            .last_document()
            .map_or(false, |doc| doc.contains("WRN") && doc.contains("disk full"))));
        assert!(surface.last_document().unwrap().starts_with("{\\rtf1\\ansi\\deff0{\\colortbl ;"));
        assert!(pipeline.shutdown(WAIT));
    }

    #[test]
    fn test_surface_is_prepared_with_default_style() {
        let (_pipeline, surface) = start(PipelineConfig::default());
        assert_eq!(surface.default_style(), Some(Theme::default().default_style()));
    }

    #[test]
    fn test_empty_template_fails_construction() {
        let surface = Arc::new(RecordingSurface::new());
        let err =
            LogPipeline::new(surface, PipelineConfig::default().with_template("")).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTemplate));
    }

    #[test]
    fn test_double_shutdown_is_noop() {
        let (mut pipeline, _surface) = start(PipelineConfig::default());
        assert!(pipeline.shutdown(WAIT));
        assert!(pipeline.shutdown(WAIT));
    }

    #[test]
    fn test_posts_after_shutdown_are_ignored() {
        let (mut pipeline, _surface) = start(PipelineConfig::default());
        let handle = pipeline.handle();
        assert!(pipeline.shutdown(WAIT));

        handle.info("Late", "ignored");
        assert_eq!(handle.len(), 0);
        assert_eq!(handle.metrics().posted(), 0);
        assert!(matches!(
            handle.reconfigure("{Message}", Theme::default()),
            Err(PipelineError::PipelineStopped)
        ));
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let (pipeline, surface) = start(
            PipelineConfig::default()
                .with_template("{Message}")
                .with_max_message_length(40),
        );
        pipeline.info("App", "y".repeat(100));

        assert!(wait_until(|| surface
            .last_document()
            .map_or(false, |doc| doc.contains("... [truncated]"))));
        assert_eq!(pipeline.metrics().truncated_messages(), 1);
        assert!(!surface.last_document().unwrap().contains(&"y".repeat(21)));
    }

    #[test]
    fn test_disposed_surface_is_skipped() {
        let (pipeline, surface) = start(PipelineConfig::default());
        surface.dispose();
        pipeline.info("App", "hidden");

        assert!(wait_until(|| pipeline.metrics().skipped_deliveries() >= 1));
        assert_eq!(surface.delivery_count(), 0);
    }

    #[test]
    fn test_delivery_errors_are_counted_and_loop_survives() {
        let (pipeline, surface) = start(PipelineConfig::default().with_template("{Message}"));
        surface.set_failing(true);
        pipeline.info("App", "first");
        assert!(wait_until(|| pipeline.metrics().failed_deliveries() >= 1));

        surface.set_failing(false);
        pipeline.info("App", "second");
        assert!(wait_until(|| surface
            .last_document()
            .map_or(false, |doc| doc.contains("second"))));
    }

    #[test]
    fn test_reconfigure_keeps_buffer() {
        let (pipeline, surface) = start(PipelineConfig::default().with_template("{Message}"));
        pipeline.info("App", "kept");
        assert!(wait_until(|| surface.delivery_count() >= 1));

        // One style for every token keeps the rendered text contiguous
        let style = crate::theme::ThemePreset::Luminous.theme().default_style();
        let uniform = Theme::builder(style).fill(style).build().unwrap();
        pipeline.reconfigure("<{Category}> {Message}", uniform).unwrap();
        assert!(wait_until(|| surface
            .last_document()
            .map_or(false, |doc| doc.contains("<App> kept"))));
        assert_eq!(pipeline.len(), 1);
    }

    struct Panicking(Theme);

    impl TokenRenderer for Panicking {
        fn render(&self, _entry: &LogEntry, _canvas: &mut dyn Canvas) {
            panic!("renderer failure");
        }

        fn theme(&self) -> &Theme {
            &self.0
        }
    }

    #[test]
    fn test_renderer_panic_is_contained() {
        let surface = Arc::new(RecordingSurface::new());
        let mut pipeline = LogPipeline::with_renderer(
            surface.clone(),
            PipelineConfig::default(),
            Arc::new(Panicking(Theme::default())),
        )
        .unwrap();

        pipeline.info("App", "boom");
        assert!(wait_until(|| pipeline.metrics().skipped_deliveries() >= 1));

        pipeline.reconfigure("{Message}", Theme::default()).unwrap();
        assert!(wait_until(|| surface
            .last_document()
            .map_or(false, |doc| doc.contains("boom"))));
        assert!(pipeline.shutdown(WAIT));
    }

    #[test]
    fn test_render_thread_is_named() {
        struct ThreadName(Theme, parking_lot::Mutex<Option<String>>);
        impl TokenRenderer for ThreadName {
            fn render(&self, _entry: &LogEntry, _canvas: &mut dyn Canvas) {
                *self.1.lock() = thread::current().name().map(str::to_string);
            }
            fn theme(&self) -> &Theme {
                &self.0
            }
        }

        let renderer = Arc::new(ThreadName(Theme::default(), parking_lot::Mutex::new(None)));
        let surface = Arc::new(RecordingSurface::new());
        let pipeline =
            LogPipeline::with_renderer(surface.clone(), PipelineConfig::default(), renderer.clone())
                .unwrap();
        pipeline.info("App", "x");

        assert!(surface.wait_for_deliveries(1, WAIT));
        assert_eq!(renderer.1.lock().as_deref(), Some(RENDER_THREAD_NAME));
    }
}
