//! Log entry structure

use super::exception::ExceptionInfo;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Suffix appended to messages cut by [`truncate_message`]
pub const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Bytes reserved below the limit so the suffix keeps the message near it
const TRUNCATION_RESERVE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<FixedOffset>,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<(String, FieldValue)>,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(level: LogLevel, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: DateTime::<FixedOffset>::from(Local::now()),
            category: category.into(),
            message: message.into(),
            exception: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Append a named parameter; insertion order is kept
    pub fn with_parameter<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// First parameter with the given name
    pub fn parameter(&self, key: &str) -> Option<&FieldValue> {
        self.parameters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Cut `message` so it stays close to `max_len` bytes.
///
/// A `max_len` of zero disables truncation. The cut lands on a UTF-8 char
/// boundary at or below `max_len - 20` and [`TRUNCATION_SUFFIX`] is
/// appended. Returns whether the message was truncated.
pub fn truncate_message(message: &mut String, max_len: usize) -> bool {
    if max_len == 0 || message.len() <= max_len {
        return false;
    }

    let mut cut = max_len.saturating_sub(TRUNCATION_RESERVE);
    while cut > 0 && !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
    message.push_str(TRUNCATION_SUFFIX);
    true
}
