//! `tracing` layer that forwards events into a pipeline

use crate::core::{FieldValue, LogEntry, LogLevel, PipelineHandle};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Target prefix of this crate's own diagnostics, which are never forwarded
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Forwards `tracing` events to a [`PipelineHandle`]
///
/// The event target becomes the category, the `message` field the message
/// and every other field a named parameter.
///
/// # Example
///
/// ```
/// use rust_rich_log::bridge::PipelineLayer;
/// use rust_rich_log::core::{LogPipeline, PipelineConfig};
/// use rust_rich_log::surfaces::RecordingSurface;
/// use std::sync::Arc;
/// use tracing_subscriber::prelude::*;
///
/// let surface = Arc::new(RecordingSurface::new());
/// let pipeline = LogPipeline::new(surface, PipelineConfig::default()).unwrap();
///
/// let subscriber = tracing_subscriber::registry().with(PipelineLayer::new(pipeline.handle()));
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info!(target: "app", user = 42, "signed in");
/// });
/// assert_eq!(pipeline.len(), 1);
/// ```
pub struct PipelineLayer {
    handle: PipelineHandle,
    min_level: LogLevel,
}

impl PipelineLayer {
    pub fn new(handle: PipelineHandle) -> Self {
        Self {
            handle,
            min_level: LogLevel::Verbose,
        }
    }

    /// Drop events below `level`
    #[must_use = "builder methods return a new value"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

/// Map a `tracing` level onto the pipeline's levels
pub fn level_from_tracing(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        Level::INFO => LogLevel::Information,
        Level::DEBUG => LogLevel::Debug,
        Level::TRACE => LogLevel::Verbose,
    }
}

impl<S> Layer<S> for PipelineLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        // The render thread reports through `tracing`; feeding that back would loop.
        if target.starts_with(OWN_TARGET) {
            return;
        }

        let level = level_from_tracing(metadata.level());
        if level < self.min_level {
            return;
        }

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let mut entry = LogEntry::new(level, target, visitor.message.unwrap_or_default());
        entry.parameters = visitor.fields;
        self.handle.post(entry);
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: Option<String>,
    fields: Vec<(String, FieldValue)>,
}

impl EntryVisitor {
    fn push(&mut self, field: &Field, value: FieldValue) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EntryVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, FieldValue::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, FieldValue::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let value = i64::try_from(value)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(value.to_string()));
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, FieldValue::Bool(value));
    }
}

impl fmt::Debug for PipelineLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineLayer")
            .field("min_level", &self.min_level)
            .finish()
    }
}
