//! Pipeline configuration

use super::buffer::MAX_CAPACITY;
use super::error::{PipelineError, Result};
use crate::render::DEFAULT_OUTPUT_TEMPLATE;
use crate::theme::Theme;
use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of entries kept on screen
pub const DEFAULT_MAX_LOG_LINES: usize = 256;

/// Minimum time between two document deliveries (16 per second)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_micros(62_500);

/// Default bound on joining the render thread at shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a [`LogPipeline`](crate::core::LogPipeline)
///
/// Durations are written in milliseconds when serialized. The theme is either
/// a preset name or an explicit token table.
///
/// # Example
///
/// ```
/// use rust_rich_log::core::PipelineConfig;
/// use rust_rich_log::theme::ThemePreset;
///
/// let config = PipelineConfig::default()
///     .with_template("{Level:u3} {Message}{NewLine}")
///     .with_theme(ThemePreset::EnhancedDark.theme())
///     .with_max_log_lines(10_000);
///
/// assert_eq!(config.max_log_lines, 2048);
///
/// let config = PipelineConfig::from_json(r#"{"theme": "Luminous", "auto_scroll": false}"#).unwrap();
/// assert!(!config.auto_scroll);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub output_template: String,

    pub theme: Theme,

    /// Entries kept in the ring buffer, clamped into 1..=2048
    #[serde(deserialize_with = "deserialize_max_log_lines")]
    pub max_log_lines: usize,

    /// Scroll to the newest entry after each delivery
    pub auto_scroll: bool,

    /// Locale for month and day names in timestamps; not serialized
    #[serde(skip)]
    pub locale: Option<Locale>,

    /// Messages longer than this many bytes are truncated; 0 disables
    pub max_message_length: usize,

    #[serde(rename = "flush_interval_ms", with = "duration_ms")]
    pub flush_interval: Duration,

    #[serde(rename = "shutdown_timeout_ms", with = "duration_ms")]
    pub shutdown_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            theme: Theme::default(),
            max_log_lines: DEFAULT_MAX_LOG_LINES,
            auto_scroll: true,
            locale: None,
            max_message_length: 0,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check settings that cannot be fixed up by clamping
    pub fn validate(&self) -> Result<()> {
        if self.output_template.is_empty() {
            return Err(PipelineError::EmptyTemplate);
        }
        if self.flush_interval.is_zero() {
            return Err(PipelineError::config(
                "flush_interval",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = template.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_max_log_lines(mut self, lines: usize) -> Self {
        self.max_log_lines = clamp_lines(lines);
        self
    }

    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: bool) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    #[must_use]
    pub fn with_max_message_length(mut self, bytes: usize) -> Self {
        self.max_message_length = bytes;
        self
    }

    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

fn clamp_lines(lines: usize) -> usize {
    lines.clamp(1, MAX_CAPACITY)
}

fn deserialize_max_log_lines<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let lines = i64::deserialize(deserializer)?;
    Ok(clamp_lines(lines.clamp(0, MAX_CAPACITY as i64) as usize))
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(deserializer)?;
        if !millis.is_finite() || millis < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "duration must be a non-negative number of milliseconds, got {}",
                millis
            )));
        }
        Duration::try_from_secs_f64(millis / 1000.0).map_err(serde::de::Error::custom)
    }
}
