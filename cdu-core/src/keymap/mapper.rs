//! Edge detection and logical key events
//!
//! There is no debounce filter beyond single-sample edge detection: a full
//! scan takes eight settle delays, and that interval is the de facto
//! debounce window.

use heapless::Vec;

use super::layout::KeyMatrixLayout;
use super::sample::{MatrixSample, KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};

/// A logical key change produced by one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChangeEvent {
    /// Logical key name
    pub name: &'static str,
    /// Raw level (simple keys) or mapped value (three-way keys)
    pub value: i32,
    /// Matrix position, row-major
    pub position: usize,
    /// True on the down-edge
    pub pressed: bool,
}

/// Events from one scan; every position can change at most once
pub type KeyEvents = Vec<KeyChangeEvent, KEY_COUNT>;

/// Last observed level per position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    levels: [u8; KEY_COUNT],
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyState {
    /// All positions released
    pub const fn new() -> Self {
        Self {
            levels: [0; KEY_COUNT],
        }
    }

    /// Stored level at a position
    pub fn level(&self, row: usize, col: usize) -> u8 {
        if row >= MATRIX_ROWS || col >= MATRIX_COLS {
            return 0;
        }
        self.levels[index(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, level: u8) {
        self.levels[index(row, col)] = level;
    }
}

/// Position index, row-major
fn index(row: usize, col: usize) -> usize {
    row * MATRIX_COLS + col
}

/// Maps raw samples to key change events against the stored state
pub struct KeyMapper {
    layout: &'static KeyMatrixLayout,
    state: KeyState,
}

impl KeyMapper {
    /// Create a mapper with every key assumed released
    pub fn new(layout: &'static KeyMatrixLayout) -> Self {
        Self {
            layout,
            state: KeyState::new(),
        }
    }

    /// Current key state table
    pub fn state(&self) -> &KeyState {
        &self.state
    }

    /// Compare a new sample with the stored state and emit changes
    ///
    /// Events come out in scan order: column by column, rows ascending
    /// within a column. The state table is updated for every position,
    /// including ones with no key.
    pub fn update(&mut self, sample: &MatrixSample) -> KeyEvents {
        let mut events = KeyEvents::new();

        for col in 0..MATRIX_COLS {
            for row in 0..MATRIX_ROWS {
                let level = sample.level(row, col);
                if self.state.level(row, col) != level {
                    let binding = self.layout.binding(row, col);
                    if let (Some(name), Some(value)) = (binding.name(), binding.value(level)) {
                        // Capacity equals the position count
                        let _ = events.push(KeyChangeEvent {
                            name,
                            value,
                            position: index(row, col),
                            pressed: level != 0,
                        });
                    }
                }
                self.state.set(row, col, level);
            }
        }

        events
    }
}
