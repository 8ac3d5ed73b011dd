//! ANSI console canvas

use super::canvas::Canvas;
use crate::theme::{Color, Style};
use colored::Colorize;

/// Canvas producing 24-bit ANSI escape sequences, for mirroring rendered
/// entries to a terminal.
///
/// # Example
///
/// ```
/// use rust_rich_log::render::{AnsiCanvas, Canvas};
///
/// let mut canvas = AnsiCanvas::with_colors(false);
/// canvas.append_text("plain");
/// assert_eq!(canvas.as_str(), "plain");
/// ```
#[derive(Debug, Clone)]
pub struct AnsiCanvas {
    output: String,
    length: usize,
    selection: (usize, usize),
    style: Style,
    use_colors: bool,
}

impl AnsiCanvas {
    pub fn new(default_style: Style) -> Self {
        Self {
            output: String::new(),
            length: 0,
            selection: (0, 0),
            style: default_style,
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new(crate::theme::Theme::default().default_style())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn clear(&mut self) {
        self.output.clear();
        self.length = 0;
        self.selection = (0, 0);
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl Canvas for AnsiCanvas {
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
        self.style.foreground
    }

    fn set_selection_color(&mut self, color: Color) {
        self.style.foreground = color;
    }

    fn selection_back_color(&self) -> Color {
        self.style.background
    }

    fn set_selection_back_color(&mut self, color: Color) {
        self.style.background = color;
    }

    fn append_text(&mut self, text: &str) {
        self.length += text.chars().count();

        if !self.use_colors {
            self.output.push_str(text);
            return;
        }

        // Line breaks stay outside escape sequences so backgrounds do not
        // bleed into the next line.
        let (fg, bg) = (self.style.foreground, self.style.background);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            if !line.is_empty() {
                let painted = line
                    .truecolor(fg.r, fg.g, fg.b)
                    .on_truecolor(bg.r, bg.g, bg.b);
                self.output.push_str(&painted.to_string());
            }
        }
    }
}
