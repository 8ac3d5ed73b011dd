//! Core pipeline types: entries, buffer, configuration and the render loop

pub mod buffer;
pub mod config;
pub mod error;
pub mod exception;
pub mod field_value;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod pipeline;
pub mod signal;
pub mod timestamp;

pub use buffer::{LogRingBuffer, MAX_CAPACITY};
pub use config::{
    PipelineConfig, DEFAULT_FLUSH_INTERVAL, DEFAULT_MAX_LOG_LINES, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use error::{PipelineError, Result};
pub use exception::{ExceptionInfo, STACK_FRAME_INDENT};
pub use field_value::FieldValue;
pub use log_entry::{truncate_message, LogEntry, TRUNCATION_SUFFIX};
pub use log_level::LogLevel;
pub use metrics::PipelineMetrics;
pub use pipeline::{LogPipeline, PipelineHandle, RENDER_THREAD_NAME};
pub use signal::{CancellationToken, Signal};
pub use timestamp::TimestampPattern;
