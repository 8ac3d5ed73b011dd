//! Incremental RTF encoder
//!
//! [`RtfEncoder`] is a [`Canvas`] that accumulates an escaped RTF body and a
//! deduplicated color table. Color switches (`\cfN`, `\highlightN`) are only
//! written when the requested color differs from the last one emitted.

use super::canvas::Canvas;
use crate::theme::{Color, Theme};
use std::collections::HashMap;
use std::fmt::Write;

/// Buffers grown past this are released instead of being reused
pub const BUFFER_HIGH_WATER_MARK: usize = 256 * 1024;

const DEFAULT_BUFFER_CAPACITY: usize = 16 * 1024;

/// Color table index meaning "no color emitted yet"
const UNSET: usize = 0;

#[derive(Debug)]
pub struct RtfEncoder {
    body: String,
    header: String,
    /// Color count the cached header was built with
    header_colors: Option<usize>,
    color_index: HashMap<Color, usize>,
    colors: Vec<Color>,
    text_length: usize,
    selection: (usize, usize),
    foreground: Color,
    background: Color,
    current_fg: usize,
    current_bg: usize,
}

impl RtfEncoder {
    /// Create an encoder whose color table starts with every color of `theme`
    pub fn new(theme: &Theme) -> Self {
        let default_style = theme.default_style();
        let mut encoder = Self {
            body: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
            header: String::new(),
            header_colors: None,
            color_index: HashMap::new(),
            colors: Vec::new(),
            text_length: 0,
            selection: (0, 0),
            foreground: default_style.foreground,
            background: default_style.background,
            current_fg: UNSET,
            current_bg: UNSET,
        };

        for color in theme.colors() {
            encoder.register_color(color);
        }
        encoder
    }

    /// 1-based color table index, registering the color if it is new
    pub fn register_color(&mut self, color: Color) -> usize {
        if let Some(&index) = self.color_index.get(&color) {
            return index;
        }

        self.colors.push(color);
        let index = self.colors.len();
        self.color_index.insert(color, index);
        index
    }

    pub fn color_index(&self, color: Color) -> Option<usize> {
        self.color_index.get(&color).copied()
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Escaped body written so far, without header or closing brace
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Reset the body for a fresh render. The color table is kept.
    pub fn clear(&mut self) {
        self.body.clear();
        release_oversized(&mut self.body);
        self.text_length = 0;
        self.selection = (0, 0);
        self.current_fg = UNSET;
        self.current_bg = UNSET;
    }

    /// The complete RTF document for the current body
    pub fn document(&mut self) -> String {
        if self.header_colors != Some(self.colors.len()) {
            self.rebuild_header();
        }

        let mut document = String::with_capacity(self.header.len() + self.body.len() + 1);
        document.push_str(&self.header);
        document.push_str(&self.body);
        document.push('}');

        release_oversized(&mut self.header);
        document
    }

    fn rebuild_header(&mut self) {
        self.header.clear();
        self.header.push_str("{\\rtf1\\ansi\\deff0{\\colortbl ;");
        for color in &self.colors {
            let _ = write!(
                self.header,
                "\\red{}\\green{}\\blue{};",
                color.r, color.g, color.b
            );
        }
        self.header.push('}');
        self.header_colors = Some(self.colors.len());
    }

    fn ensure_color_switch(&mut self) {
        let fg = self.register_color(self.foreground);
        let bg = self.register_color(self.background);

        if fg != self.current_fg {
            self.current_fg = fg;
            let _ = write!(self.body, "\\cf{} ", fg);
        }
        if bg != self.current_bg {
            self.current_bg = bg;
            let _ = write!(self.body, "\\highlight{} ", bg);
        }
    }

    fn escape_and_append(&mut self, text: &str) {
        let mut units = [0u16; 2];
        for ch in text.chars() {
            match ch {
                '\\' | '{' | '}' => {
                    self.body.push('\\');
                    self.body.push(ch);
                }
                '\n' => self.body.push_str("\\par\n"),
                '\r' => {}
                '\t' => self.body.push_str("\\tab "),
                ' '..='~' => self.body.push(ch),
                _ => {
                    for unit in ch.encode_utf16(&mut units).iter() {
                        let _ = write!(self.body, "\\u{}?", *unit as i16);
                    }
                }
            }
        }
    }
}

fn release_oversized(buffer: &mut String) {
    if buffer.capacity() > BUFFER_HIGH_WATER_MARK {
        *buffer = String::with_capacity(DEFAULT_BUFFER_CAPACITY);
    }
}

impl Canvas for RtfEncoder {
    fn text_length(&self) -> usize {
        self.text_length
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
        self.ensure_color_switch();
        self.escape_and_append(text);
        self.text_length += text.chars().count();
    }
}
