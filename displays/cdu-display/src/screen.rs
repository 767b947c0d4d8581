//! Screen buffer types
//!
//! A character buffer for static page content, rendered to any
//! `DisplayBackend` in one pass.

use heapless::String;

use crate::backend::{Color, DisplayBackend, DisplayError, Style};

/// Number of character rows on the CDU face
pub const SCREEN_ROWS: usize = 10;

/// Number of character columns on the CDU face
pub const SCREEN_COLS: usize = 24;

/// Bytes per line; glyphs take up to 4 bytes each in UTF-8
pub const LINE_CAPACITY: usize = SCREEN_COLS * 4;

/// Screen buffer for static text pages
#[derive(Clone)]
pub struct Screen {
    /// Current content, unpadded
    lines: [String<LINE_CAPACITY>; SCREEN_ROWS],
    /// Rows drawn highlighted
    highlights: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [false; SCREEN_ROWS],
        }
    }

    /// Set the content of a specific row, truncated to the screen width
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for c in text.chars().take(SCREEN_COLS) {
                let _ = line.push(c);
            }
        }
    }

    /// Set a row to `text` centered within the screen width
    pub fn set_centered(&mut self, row: usize, text: &str) {
        let len = text.chars().count().min(SCREEN_COLS);
        let left = (SCREEN_COLS - len) / 2;

        let mut padded: String<LINE_CAPACITY> = String::new();
        for _ in 0..left {
            let _ = padded.push(' ');
        }
        for c in text.chars().take(len) {
            let _ = padded.push(c);
        }
        self.set_line(row, &padded);
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Mark a row highlighted (or not)
    pub fn set_highlight(&mut self, row: usize, on: bool) {
        if let Some(h) = self.highlights.get_mut(row) {
            *h = on;
        }
    }

    /// Check whether a row is highlighted
    pub fn is_highlighted(&self, row: usize) -> bool {
        self.highlights.get(row).copied().unwrap_or(false)
    }

    /// Paint every non-empty row to the backend in `color`
    ///
    /// Highlighted rows are padded to the full width so the inverse bar
    /// spans the screen.
    pub fn render<D: DisplayBackend>(&self, display: &mut D, color: Color) -> Result<(), DisplayError> {
        for (row, line) in self.lines.iter().enumerate() {
            if self.highlights[row] {
                let mut bar: String<LINE_CAPACITY> = line.clone();
                for _ in line.chars().count()..SCREEN_COLS {
                    let _ = bar.push(' ');
                }
                display.draw_text(row as u8, 0, &bar, Style::inverse(color))?;
            } else if !line.is_empty() {
                display.draw_text(row as u8, 0, line, Style::plain(color))?;
            }
        }
        Ok(())
    }
}
