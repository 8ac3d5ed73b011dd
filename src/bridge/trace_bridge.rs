//! Writer adapter that turns plain text output into pipeline entries

use super::level_detect::{detect_level, LevelKeywords};
use crate::core::{LogEntry, LogLevel, PipelineHandle};
use std::io;
use std::sync::Arc;

/// Parameter holding the detail text of a [`TraceBridge::fail`] call
pub const FAIL_DETAILS_PARAMETER: &str = "FailDetails";

/// Posts each line written to it as a log entry, classifying its level with
/// [`detect_level`]
///
/// Implements [`io::Write`], so it can stand in wherever a library writes
/// diagnostics to a writer. Bytes are buffered until a newline; a partial
/// line is posted on [`flush`](io::Write::flush) or drop.
///
/// # Example
///
/// ```
/// use rust_rich_log::bridge::TraceBridge;
/// use rust_rich_log::core::{LogPipeline, PipelineConfig};
/// use rust_rich_log::surfaces::RecordingSurface;
/// use std::io::Write;
/// use std::sync::Arc;
///
/// let surface = Arc::new(RecordingSurface::new());
/// let pipeline = LogPipeline::new(surface, PipelineConfig::default()).unwrap();
///
/// let mut bridge = TraceBridge::new(pipeline.handle(), "stdout");
/// writeln!(bridge, "[WARN] cache miss").unwrap();
/// assert_eq!(pipeline.len(), 1);
/// ```
pub struct TraceBridge {
    handle: PipelineHandle,
    category: String,
    keywords: Arc<LevelKeywords>,
    pending: Vec<u8>,
}

impl TraceBridge {
    pub fn new(handle: PipelineHandle, category: impl Into<String>) -> Self {
        Self {
            handle,
            category: category.into(),
            keywords: Arc::new(LevelKeywords::default()),
            pending: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_keywords(mut self, keywords: LevelKeywords) -> Self {
        self.keywords = Arc::new(keywords);
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn keywords(&self) -> &LevelKeywords {
        &self.keywords
    }

    /// Post one message under the bridge's category
    pub fn write_line(&self, message: &str) {
        self.write_line_in(&self.category, message);
    }

    /// Post one message under `category`; a blank category falls back to
    /// the bridge's own
    pub fn write_line_in(&self, category: &str, message: &str) {
        let category = if category.trim().is_empty() {
            &self.category
        } else {
            category
        };
        let level = detect_level(message, &self.keywords);
        self.handle.log(level, category, message);
    }

    /// Report a failed assertion; always posted at [`LogLevel::Fatal`]
    pub fn fail(&self, message: &str, details: Option<&str>) {
        let mut entry = LogEntry::new(LogLevel::Fatal, self.category.as_str(), message);
        if let Some(details) = details {
            entry = entry.with_parameter(FAIL_DETAILS_PARAMETER, details);
        }
        self.handle.post(entry);
    }

    fn post_bytes(&self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        self.write_line(&String::from_utf8_lossy(line));
    }
}

impl io::Write for TraceBridge {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (line, tail) = rest.split_at(pos);
            if self.pending.is_empty() {
                self.post_bytes(line);
            } else {
                self.pending.extend_from_slice(line);
                let joined = std::mem::take(&mut self.pending);
                self.post_bytes(&joined);
            }
            rest = &tail[1..];
        }
        self.pending.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let partial = std::mem::take(&mut self.pending);
            self.post_bytes(&partial);
        }
        Ok(())
    }
}

impl Drop for TraceBridge {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

impl std::fmt::Debug for TraceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceBridge")
            .field("category", &self.category)
            .field("pending_bytes", &self.pending.len())
            .finish()
    }
}
