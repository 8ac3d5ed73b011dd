//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes a pipeline (or [`PipelineHandle`](crate::core::PipelineHandle)),
//! a category and `format!` arguments.
//!
//! # Examples
//!
//! ```
//! use rust_rich_log::prelude::*;
//! use rust_rich_log::info;
//! use std::sync::Arc;
//!
//! let surface = Arc::new(RecordingSurface::new());
//! let pipeline = LogPipeline::new(surface, PipelineConfig::default()).unwrap();
//!
//! info!(pipeline, "server", "Server started");
//!
//! let port = 8080;
//! info!(pipeline, "server", "Listening on port {}", port);
//! assert_eq!(pipeline.len(), 2);
//! ```

/// Post a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_rich_log::prelude::*;
/// # use std::sync::Arc;
/// # let pipeline = LogPipeline::new(Arc::new(RecordingSurface::new()), PipelineConfig::default()).unwrap();
/// use rust_rich_log::log;
/// log!(pipeline, LogLevel::Information, "app", "Simple message");
/// log!(pipeline, LogLevel::Error, "http", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($pipeline:expr, $level:expr, $category:expr, $($arg:tt)+) => {
        $pipeline.log($level, $category, format!($($arg)+))
    };
}

/// Post a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Verbose, $category, $($arg)+)
    };
}

/// Post a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_rich_log::prelude::*;
/// # use std::sync::Arc;
/// # let pipeline = LogPipeline::new(Arc::new(RecordingSurface::new()), PipelineConfig::default()).unwrap();
/// use rust_rich_log::debug;
/// debug!(pipeline, "cache", "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Debug, $category, $($arg)+)
    };
}

/// Post an information-level message.
#[macro_export]
macro_rules! info {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Information, $category, $($arg)+)
    };
}

/// Post a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_rich_log::prelude::*;
/// # use std::sync::Arc;
/// # let pipeline = LogPipeline::new(Arc::new(RecordingSurface::new()), PipelineConfig::default()).unwrap();
/// use rust_rich_log::warn;
/// warn!(pipeline, "disk", "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Warning, $category, $($arg)+)
    };
}

/// Post an error-level message.
#[macro_export]
macro_rules! error {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Error, $category, $($arg)+)
    };
}

/// Post a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($pipeline:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::core::LogLevel::Fatal, $category, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LogPipeline, PipelineConfig};
    use crate::surfaces::RecordingSurface;
    use std::sync::Arc;

    fn pipeline() -> LogPipeline {
        LogPipeline::new(Arc::new(RecordingSurface::new()), PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_log_macro() {
        let pipeline = pipeline();
        log!(pipeline, LogLevel::Information, "app", "Test message");
        log!(pipeline, LogLevel::Information, "app", "Formatted: {}", 42);
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_level_macros() {
        let pipeline = pipeline();
        verbose!(pipeline, "app", "Verbose message");
        debug!(pipeline, "app", "Count: {}", 5);
        info!(pipeline, "app", "Items: {}", 100);
        warn!(pipeline, "app", "Retry {} of {}", 1, 3);
        error!(pipeline, "app", "Code: {}", 500);
        fatal!(pipeline, "app", "Shutting down");
        assert_eq!(pipeline.len(), 6);
        assert_eq!(pipeline.metrics().posted(), 6);
    }

    #[test]
    fn test_macros_accept_handles() {
        let pipeline = pipeline();
        let handle = pipeline.handle();
        let category = String::from("worker");
        info!(handle, category.as_str(), "from {}", "handle");
        assert_eq!(pipeline.len(), 1);
    }
}
