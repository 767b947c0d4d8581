//! Mirrored simulator screen content

use cdu_display::{LINE_CAPACITY, SCREEN_COLS, SCREEN_ROWS};
use heapless::String;

/// Last received text for every simulator row
///
/// Rows always hold exactly [`SCREEN_COLS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    rows: [String<LINE_CAPACITY>; SCREEN_ROWS],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Create a buffer of blank rows
    pub fn new() -> Self {
        Self {
            rows: core::array::from_fn(|_| pad("")),
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Overwrite a row, truncating or space-padding to the screen width
    ///
    /// Returns true if the stored content changed. Rows outside the buffer
    /// are left alone and report no change.
    pub fn set_row(&mut self, row: usize, text: &str) -> bool {
        let Some(slot) = self.rows.get_mut(row) else {
            return false;
        };
        let padded = pad(text);
        if *slot == padded {
            return false;
        }
        *slot = padded;
        true
    }

    /// Get a row's content
    pub fn row(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|s| s.as_str())
    }

    /// Iterate rows top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|s| s.as_str())
    }
}

fn pad(text: &str) -> String<LINE_CAPACITY> {
    let mut out = String::new();
    let mut count = 0;
    for c in text.chars().take(SCREEN_COLS) {
        if out.push(c).is_err() {
            break;
        }
        count += 1;
    }
    for _ in count..SCREEN_COLS {
        let _ = out.push(' ');
    }
    out
}
