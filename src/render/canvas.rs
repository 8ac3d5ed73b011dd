//! Cursor-based styled text sinks

use crate::theme::{Color, Style, ThemeColors};

/// The only interface token renderers write through.
///
/// Text is inserted at the end with the current selection colors. Lengths and
/// selection offsets count characters.
pub trait Canvas {
    fn text_length(&self) -> usize;

    fn selection_start(&self) -> usize;

    fn selection_length(&self) -> usize;

    fn set_selection(&mut self, start: usize, length: usize);

    fn selection_color(&self) -> Color;

    fn set_selection_color(&mut self, color: Color);

    fn selection_back_color(&self) -> Color;

    fn set_selection_back_color(&mut self, color: Color);

    fn append_text(&mut self, text: &str);
}

/// Canvas that keeps plain text plus the styled runs it was written in
#[derive(Debug, Clone)]
pub struct PlainTextCanvas {
    text: String,
    length: usize,
    runs: Vec<(Style, String)>,
    selection: (usize, usize),
    foreground: Color,
    background: Color,
}

impl PlainTextCanvas {
    pub fn new() -> Self {
        Self::with_style(Style::new(ThemeColors::WHITE, ThemeColors::BLACK))
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            text: String::new(),
            length: 0,
            runs: Vec::new(),
            selection: (0, 0),
            foreground: style.foreground,
            background: style.background,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appended text grouped into runs of identical style
    pub fn runs(&self) -> &[(Style, String)] {
        &self.runs
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.runs.clear();
        self.length = 0;
        self.selection = (0, 0);
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Default for PlainTextCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for PlainTextCanvas {
    fn text_length(&self) -> usize {
        self.length
    }

    fn selection_start(&self) -> usize {
        self.selection.0
    }

    fn selection_length(&self) -> usize {
        self.selection.1
    }

    fn set_selection(&mut self, start: usize, length: usize) {
        self.selection = (start, length);
    }

    fn selection_color(&self) -> Color {
        self.foreground
    }

    fn set_selection_color(&mut self, color: Color) {
        self.foreground = color;
    }

    fn selection_back_color(&self) -> Color {
        self.background
    }

    fn set_selection_back_color(&mut self, color: Color) {
        self.background = color;
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let style = Style::new(self.foreground, self.background);
        match self.runs.last_mut() {
            Some((last, run)) if *last == style => run.push_str(text),
            _ => self.runs.push((style, text.to_string())),
        }

        self.text.push_str(text);
        self.length += text.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_merge_same_style() {
        let mut canvas = PlainTextCanvas::new();
        canvas.append_text("a");
        canvas.append_text("b");
        canvas.set_selection_color(ThemeColors::RED);
        canvas.append_text("c");

        assert_eq!(canvas.text(), "abc");
        assert_eq!(canvas.runs().len(), 2);
        assert_eq!(canvas.runs()[0].1, "ab");
        assert_eq!(canvas.runs()[1].0.foreground, ThemeColors::RED);
    }

    #[test]
    fn test_length_counts_chars() {
        let mut canvas = PlainTextCanvas::new();
        canvas.append_text("héllo");
        assert_eq!(canvas.text_length(), 5);
        canvas.clear();
        assert_eq!(canvas.text_length(), 0);
        assert!(canvas.runs().is_empty());
    }
}
