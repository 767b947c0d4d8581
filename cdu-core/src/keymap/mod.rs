//! Key matrix layout and edge detection
//!
//! The CDU keyboard is a 9 x 8 matrix. Eight rows come from the port
//! expander's input register, the ninth from a discrete GPIO line; the
//! scanner merges both into one [`MatrixSample`] per cycle.

pub mod layout;
pub mod mapper;
pub mod sample;

pub use layout::{KeyBinding, KeyMatrixLayout, CDU_LAYOUT};
pub use mapper::{KeyChangeEvent, KeyEvents, KeyMapper, KeyState};
pub use sample::{MatrixSample, KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};
