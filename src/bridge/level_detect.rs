//! Level detection for free-form trace output
//!
//! Text written through a plain writer carries no level. It is classified by
//! a bracketed prefix tag such as `[WARN]` or, failing that, by configurable
//! keywords found anywhere in the message.

use crate::core::{LogLevel, PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Most keywords accepted for a single level
pub const MAX_KEYWORDS_PER_LEVEL: usize = 5;

const KEYWORD_SEPARATOR: char = ',';

const PREFIX_TAGS: [(LogLevel, &[&str]); 6] = [
    (LogLevel::Fatal, &["[FATAL]", "[FTL]", "[CRITICAL]", "[CRT]"]),
    (LogLevel::Error, &["[ERROR]", "[ERR]"]),
    (LogLevel::Warning, &["[WARNING]", "[WARN]", "[WRN]"]),
    (LogLevel::Information, &["[INFO]", "[INF]", "[INFORMATION]"]),
    (LogLevel::Debug, &["[DEBUG]", "[DBG]"]),
    (LogLevel::Verbose, &["[TRACE]", "[TRC]", "[VERBOSE]", "[VRB]"]),
];

/// Keyword lists, most severe level first
///
/// Keywords are stored lowercased and matched case-insensitively.
///
/// # Example
///
/// ```
/// use rust_rich_log::bridge::{detect_level, LevelKeywords};
/// use rust_rich_log::core::LogLevel;
///
/// let keywords = LevelKeywords::default()
///     .with_warning("slow, retry")
///     .unwrap();
///
/// assert_eq!(detect_level("request was SLOW", &keywords), LogLevel::Warning);
/// assert_eq!(detect_level("[ERR] boom", &keywords), LogLevel::Error);
/// assert_eq!(detect_level("nothing to see", &keywords), LogLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeywordLists", into = "KeywordLists")]
pub struct LevelKeywords {
    fatal: Vec<String>,
    error: Vec<String>,
    warning: Vec<String>,
    information: Vec<String>,
}

impl LevelKeywords {
    /// No keywords at all; only prefix tags classify messages
    pub fn none() -> Self {
        Self {
            fatal: Vec::new(),
            error: Vec::new(),
            warning: Vec::new(),
            information: Vec::new(),
        }
    }

    pub fn with_fatal(mut self, keywords: &str) -> Result<Self> {
        self.fatal = parse_keywords(keywords)?;
        Ok(self)
    }

    pub fn with_error(mut self, keywords: &str) -> Result<Self> {
        self.error = parse_keywords(keywords)?;
        Ok(self)
    }

    pub fn with_warning(mut self, keywords: &str) -> Result<Self> {
        self.warning = parse_keywords(keywords)?;
        Ok(self)
    }

    pub fn with_information(mut self, keywords: &str) -> Result<Self> {
        self.information = parse_keywords(keywords)?;
        Ok(self)
    }

    /// Keywords for `level`; empty for levels that have none
    pub fn keywords(&self, level: LogLevel) -> &[String] {
        match level {
            LogLevel::Fatal => &self.fatal,
            LogLevel::Error => &self.error,
            LogLevel::Warning => &self.warning,
            LogLevel::Information => &self.information,
            LogLevel::Debug | LogLevel::Verbose => &[],
        }
    }

    fn detect(&self, message: &str) -> Option<LogLevel> {
        let lowered = message.to_lowercase();
        [
            (LogLevel::Fatal, &self.fatal),
            (LogLevel::Error, &self.error),
            (LogLevel::Warning, &self.warning),
            (LogLevel::Information, &self.information),
        ]
        .into_iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|(level, _)| level)
    }
}

impl Default for LevelKeywords {
    fn default() -> Self {
        Self {
            fatal: defaults(&["fatal", "critical", "crash"]),
            error: defaults(&["error", "failed", "exception"]),
            warning: defaults(&["warning", "warn", "caution"]),
            information: defaults(&["info", "success", "completed"]),
        }
    }
}

fn defaults(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Check a comma-separated keyword list without keeping it
pub fn validate_keywords(input: &str) -> Result<()> {
    parse_keywords(input).map(|_| ())
}

fn parse_keywords(input: &str) -> Result<Vec<String>> {
    let keywords: Vec<String> = input
        .split(KEYWORD_SEPARATOR)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect();

    if keywords.len() > MAX_KEYWORDS_PER_LEVEL {
        return Err(PipelineError::config(
            "keywords",
            format!("Maximum {} keywords allowed, got {}", MAX_KEYWORDS_PER_LEVEL, keywords.len()),
        ));
    }
    Ok(keywords)
}

/// Classify a message: prefix tag, then keywords, then [`LogLevel::Debug`]
pub fn detect_level(message: &str, keywords: &LevelKeywords) -> LogLevel {
    if message.trim().is_empty() {
        return LogLevel::Debug;
    }

    detect_prefix(message)
        .or_else(|| keywords.detect(message))
        .unwrap_or(LogLevel::Debug)
}

fn detect_prefix(message: &str) -> Option<LogLevel> {
    let trimmed = message.trim_start();
    PREFIX_TAGS
        .iter()
        .find(|(_, tags)| tags.iter().any(|tag| starts_with_ignore_case(trimmed, tag)))
        .map(|(level, _)| *level)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Serialized form: one comma-separated string per level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct KeywordLists {
    fatal: String,
    error: String,
    warning: String,
    information: String,
}

impl Default for KeywordLists {
    fn default() -> Self {
        LevelKeywords::default().into()
    }
}

impl From<LevelKeywords> for KeywordLists {
    fn from(keywords: LevelKeywords) -> Self {
        let join = |list: Vec<String>| list.join(",");
        Self {
            fatal: join(keywords.fatal),
            error: join(keywords.error),
            warning: join(keywords.warning),
            information: join(keywords.information),
        }
    }
}

impl TryFrom<KeywordLists> for LevelKeywords {
    type Error = PipelineError;

    fn try_from(lists: KeywordLists) -> Result<Self> {
        Ok(Self {
            fatal: parse_keywords(&lists.fatal)?,
            error: parse_keywords(&lists.error)?,
            warning: parse_keywords(&lists.warning)?,
            information: parse_keywords(&lists.information)?,
        })
    }
}
