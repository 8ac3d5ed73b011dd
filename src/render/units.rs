//! Render units: one per placeholder kind

use super::canvas::Canvas;
use super::level_moniker::LevelMonikers;
use crate::core::{LogEntry, TimestampPattern, STACK_FRAME_INDENT};
use crate::theme::{StyleToken, Theme};
use chrono::Locale;

/// Platform line terminator
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// One compiled piece of an output template
#[derive(Debug, Clone, PartialEq)]
pub enum RenderUnit {
    /// Fixed text between placeholders
    Literal(String),
    Timestamp {
        pattern: TimestampPattern,
        locale: Option<Locale>,
    },
    Level(LevelMonikers),
    Message,
    Category,
    Exception,
    NewLine,
}

impl RenderUnit {
    /// Unit for a placeholder name, or `None` for names with no renderer
    pub fn for_placeholder(name: &str, format: &str, locale: Option<Locale>) -> Option<Self> {
        let unit = match name.to_ascii_lowercase().as_str() {
            "timestamp" => RenderUnit::Timestamp {
                pattern: TimestampPattern::new(format),
                locale,
            },
            "level" => RenderUnit::Level(LevelMonikers::new(format)),
            "message" => RenderUnit::Message,
            "category" => RenderUnit::Category,
            "exception" => RenderUnit::Exception,
            "newline" => RenderUnit::NewLine,
            _ => return None,
        };
        Some(unit)
    }

    pub fn render(&self, theme: &Theme, entry: &LogEntry, canvas: &mut dyn Canvas) {
        match self {
            RenderUnit::Literal(text) => theme.render(canvas, StyleToken::TertiaryText, text),
            RenderUnit::Timestamp { pattern, locale } => {
                let text = pattern.format(&entry.timestamp, *locale);
                theme.render(canvas, StyleToken::SecondaryText, &text);
            }
            RenderUnit::Level(monikers) => theme.render(
                canvas,
                StyleToken::for_level(entry.level),
                monikers.get(entry.level),
            ),
            RenderUnit::Message => theme.render(canvas, StyleToken::Text, &entry.message),
            RenderUnit::Category => theme.render(canvas, StyleToken::Name, &entry.category),
            RenderUnit::Exception => render_exception(theme, entry, canvas),
            RenderUnit::NewLine => canvas.append_text(LINE_ENDING),
        }
    }
}

fn render_exception(theme: &Theme, entry: &LogEntry, canvas: &mut dyn Canvas) {
    let Some(exception) = &entry.exception else {
        return;
    };

    let text = exception.to_string();
    for line in text.lines() {
        if !line.is_empty() {
            let token = if line.starts_with(STACK_FRAME_INDENT) {
                StyleToken::SecondaryText
            } else {
                StyleToken::Text
            };
            theme.render(canvas, token, line);
        }
        canvas.append_text(LINE_ENDING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExceptionInfo, LogLevel};
    use crate::render::PlainTextCanvas;

    fn entry() -> LogEntry {
        LogEntry::new(LogLevel::Error, "Db", "query failed")
    }

    #[test]
    fn test_unknown_placeholder_has_no_unit() {
        assert!(RenderUnit::for_placeholder("Properties", "", None).is_none());
        assert_eq!(
            RenderUnit::for_placeholder("MESSAGE", "", None),
            Some(RenderUnit::Message)
        );
    }

    #[test]
    fn test_level_uses_level_style() {
        let theme = Theme::default();
        let mut canvas = PlainTextCanvas::new();
        RenderUnit::Level(LevelMonikers::new("u3")).render(&theme, &entry(), &mut canvas);

        assert_eq!(canvas.text(), "ERR");
        assert_eq!(canvas.runs()[0].0, theme.style(StyleToken::LevelError));
    }

    #[test]
    fn test_exception_without_exception_renders_nothing() {
        let theme = Theme::default();
        let mut canvas = PlainTextCanvas::new();
        RenderUnit::Exception.render(&theme, &entry(), &mut canvas);
        assert_eq!(canvas.text(), "");
    }

    #[test]
    fn test_exception_lines_and_frame_styles() {
        let theme = Theme::default();
        let exception = ExceptionInfo::new("InvalidOperation", "outer")
            .with_frame("at Service.Save()")
            .with_inner(ExceptionInfo::new("IoError", "inner").with_frame("at Storage.Write()"));
        let entry = entry().with_exception(exception);

        let mut canvas = PlainTextCanvas::new();
        RenderUnit::Exception.render(&theme, &entry, &mut canvas);

        let expected = [
            "InvalidOperation: outer ---> IoError: inner",
            "   at Storage.Write()",
            "   --- End of inner exception stack trace ---",
            "   at Service.Save()",
        ]
        .iter()
        .map(|line| format!("{}{}", line, LINE_ENDING))
        .collect::<String>();
        assert_eq!(canvas.text(), expected);

        let secondary = theme.style(StyleToken::SecondaryText);
        let frame_runs = canvas
            .runs()
            .iter()
            .filter(|(style, text)| *style == secondary && text.starts_with(STACK_FRAME_INDENT))
            .count();
        assert!(frame_runs >= 1);
        assert_eq!(canvas.runs()[0].0, theme.style(StyleToken::Text));
    }

    #[test]
    fn test_exception_trailing_newline_adds_no_blank_line() {
        let theme = Theme::default();
        let entry = entry().with_exception(ExceptionInfo::new("Timeout", "gave up\r\n"));

        let mut canvas = PlainTextCanvas::new();
        RenderUnit::Exception.render(&theme, &entry, &mut canvas);

        assert_eq!(canvas.text(), format!("Timeout: gave up{}", LINE_ENDING));
    }
}
