//! Output template compilation
//!
//! A template is literal text with `{Name}` or `{Name:format}` placeholders.
//! Names are matched case-insensitively against `Timestamp`, `Level`,
//! `Message`, `Category`, `Exception` and `NewLine`. Placeholders with any
//! other name are dropped. A `{` that does not open a well-formed placeholder
//! stays literal text.

use super::canvas::Canvas;
use super::renderer::TokenRenderer;
use super::units::RenderUnit;
use crate::core::{LogEntry, PipelineError, Result};
use crate::theme::Theme;
use chrono::Locale;
use std::sync::Arc;

/// Template used when none is configured
pub const DEFAULT_OUTPUT_TEMPLATE: &str =
    "[{Timestamp:HH:mm:ss} {Level:u3}] {Message}{NewLine}{Exception}";

/// A compiled output template
///
/// # Example
///
/// ```
/// use rust_rich_log::core::{LogEntry, LogLevel};
/// use rust_rich_log::render::{OutputTemplate, PlainTextCanvas, TokenRenderer};
/// use rust_rich_log::theme::Theme;
/// use std::sync::Arc;
///
/// let template = OutputTemplate::compile("{Level:u3} {Message}", Arc::new(Theme::default()), None).unwrap();
/// let mut canvas = PlainTextCanvas::new();
/// template.render(&LogEntry::new(LogLevel::Warning, "Disk", "disk full"), &mut canvas);
/// assert_eq!(canvas.text(), "WRN disk full");
/// ```
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    source: String,
    units: Vec<RenderUnit>,
    theme: Arc<Theme>,
    dropped: Vec<String>,
}

impl OutputTemplate {
    pub fn compile(template: &str, theme: Arc<Theme>, locale: Option<Locale>) -> Result<Self> {
        if template.is_empty() {
            return Err(PipelineError::EmptyTemplate);
        }

        let mut units = Vec::new();
        let mut dropped = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(offset) = template[cursor..].find('{') {
            let open = cursor + offset;
            let Some(placeholder) = scan_placeholder(template, open) else {
                cursor = open + 1;
                continue;
            };

            if open > literal_start {
                units.push(RenderUnit::Literal(template[literal_start..open].to_string()));
            }

            match RenderUnit::for_placeholder(placeholder.name, placeholder.format, locale) {
                Some(unit) => units.push(unit),
                None => dropped.push(placeholder.name.to_string()),
            }

            cursor = placeholder.end;
            literal_start = placeholder.end;
        }

        if literal_start < template.len() {
            units.push(RenderUnit::Literal(template[literal_start..].to_string()));
        }

        if !dropped.is_empty() {
            tracing::warn!(
                template,
                dropped = ?dropped,
                "output template contains placeholders with no renderer"
            );
        }

        Ok(Self {
            source: template.to_string(),
            units,
            theme,
            dropped,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn units(&self) -> &[RenderUnit] {
        &self.units
    }

    pub fn shared_theme(&self) -> Arc<Theme> {
        Arc::clone(&self.theme)
    }

    /// Names of placeholders that had no renderer and were left out
    pub fn dropped_placeholders(&self) -> &[String] {
        &self.dropped
    }
}

impl TokenRenderer for OutputTemplate {
    fn render(&self, entry: &LogEntry, canvas: &mut dyn Canvas) {
        for unit in &self.units {
            unit.render(&self.theme, entry, canvas);
        }
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}

struct Placeholder<'a> {
    name: &'a str,
    format: &'a str,
    /// Byte offset just past the closing brace
    end: usize,
}

/// Match `{name}` or `{name:format}` at `open`
fn scan_placeholder(template: &str, open: usize) -> Option<Placeholder<'_>> {
    let body = &template[open + 1..];
    let name_len: usize = body
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    if name_len == 0 {
        return None;
    }

    let name = &body[..name_len];
    let rest = &body[name_len..];
    let name_end = open + 1 + name_len;

    if rest.starts_with('}') {
        return Some(Placeholder {
            name,
            format: "",
            end: name_end + 1,
        });
    }

    let format_body = rest.strip_prefix(':')?;
    let close = format_body.find('}')?;
    Some(Placeholder {
        name,
        format: &format_body[..close],
        end: name_end + 1 + close + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExceptionInfo, LogLevel};
    use crate::render::PlainTextCanvas;
    use chrono::DateTime;

    fn compile(template: &str) -> OutputTemplate {
        OutputTemplate::compile(template, Arc::new(Theme::default()), None).unwrap()
    }

    fn render(template: &OutputTemplate, entry: &LogEntry) -> String {
        let mut canvas = PlainTextCanvas::new();
        template.render(entry, &mut canvas);
        canvas.into_text()
    }

    fn warning() -> LogEntry {
        let ts = DateTime::parse_from_rfc3339("2025-01-08T10:30:45+00:00").unwrap();
        LogEntry::new(LogLevel::Warning, "Storage", "disk full").with_timestamp(ts)
    }

    #[test]
    fn test_empty_template_is_rejected() {
        let err = OutputTemplate::compile("", Arc::new(Theme::default()), None).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTemplate));
    }

    #[test]
    fn test_round_trip() {
        let template = compile("[{Timestamp:HH:mm:ss} {Level:u3}] {Message}");
        assert_eq!(render(&template, &warning()), "[10:30:45 WRN] disk full");
    }

    #[test]
    fn test_units_in_order() {
        let template = compile("[{Level}] {Category}: {Message}{NewLine}");
        let units = template.units();
        assert_eq!(units.len(), 7);
        assert_eq!(units[0], RenderUnit::Literal("[".to_string()));
        assert!(matches!(units[1], RenderUnit::Level(_)));
        assert_eq!(units[2], RenderUnit::Literal("] ".to_string()));
        assert_eq!(units[3], RenderUnit::Category);
        assert_eq!(units[6], RenderUnit::NewLine);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let template = compile("{LEVEL:w3} {message}");
        assert_eq!(render(&template, &warning()), "wrn disk full");
    }

    #[test]
    fn test_unknown_placeholders_are_dropped() {
        let template = compile("a{Properties}b{Scope:j}c");
        assert_eq!(render(&template, &warning()), "abc");
        assert_eq!(template.dropped_placeholders(), ["Properties", "Scope"]);
    }

    #[test]
    fn test_malformed_braces_stay_literal() {
        let template = compile("{ {Message} {} {Message {bad-name} }");
        assert_eq!(
            render(&template, &warning()),
            "{ disk full {} {Message {bad-name} }"
        );
        assert!(template.dropped_placeholders().is_empty());
    }

    #[test]
    fn test_format_is_passed_uninterpreted() {
        let template = compile("{Timestamp:yyyy-MM-dd 'at' HH}");
        assert_eq!(render(&template, &warning()), "2025-01-08 at 10");
    }

    #[test]
    fn test_exception_placeholder() {
        let template = compile("{Message}{NewLine}{Exception}");
        let entry = warning().with_exception(ExceptionInfo::new("IoError", "gone"));
        let text = render(&template, &entry);
        assert!(text.contains("IoError: gone"));
        assert!(text.ends_with(crate::render::LINE_ENDING));
    }
}
