//! # Rust Rich Log
//!
//! An asynchronous log rendering pipeline that turns structured log entries
//! into a colored rich-text (RTF) document for a log viewer.
//!
//! ## Features
//!
//! - **Non-blocking producers**: posting only appends to a bounded ring buffer
//! - **Output templates**: `{Timestamp:HH:mm:ss} [{Level:u3}] {Message}{NewLine}{Exception}`
//! - **Themes**: six presets or fully custom per-token colors
//! - **Incremental RTF encoding**: deduplicated color table, minimal control words
//! - **Throttled rendering**: bursts coalesce into at most one document per flush interval
//! - **Clear and restore**: hide what is on screen and bring it back later
//!
//! ## Example
//!
//! ```
//! use rust_rich_log::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let surface = Arc::new(RecordingSurface::new());
//! let config = PipelineConfig::default().with_theme(ThemePreset::Grayscale.theme());
//! let pipeline = LogPipeline::new(surface.clone(), config).unwrap();
//!
//! pipeline.info("startup", "Ready");
//! assert!(surface.wait_for_deliveries(1, Duration::from_secs(2)));
//! assert!(surface.last_document().unwrap().starts_with("{\\rtf1"));
//! ```

pub mod bridge;
pub mod core;
pub mod macros;
pub mod render;
pub mod surfaces;
pub mod theme;

pub mod prelude {
    pub use crate::bridge::{detect_level, LevelKeywords, TraceBridge};
    pub use crate::core::{
        ExceptionInfo, FieldValue, LogEntry, LogLevel, LogPipeline, LogRingBuffer, PipelineConfig,
        PipelineError, PipelineHandle, PipelineMetrics, Result,
    };
    pub use crate::render::{Canvas, OutputTemplate, PlainTextCanvas, RtfEncoder, TokenRenderer};
    pub use crate::surfaces::{
        dispatch_channel, DisplaySurface, RecordingSurface, ScrollPosition, ScrollView,
    };
    pub use crate::theme::{Color, Style, StyleToken, Theme, ThemePreset};
}

pub use core::{
    LogEntry, LogLevel, LogPipeline, PipelineConfig, PipelineError, PipelineHandle, Result,
};
pub use render::{OutputTemplate, RtfEncoder};
pub use surfaces::DisplaySurface;
pub use theme::{Theme, ThemePreset};
