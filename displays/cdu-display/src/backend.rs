//! Display backend trait
//!
//! Defines the interface for the rendering surface.

use core::fmt;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Write to the underlying device failed
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display write failed"),
            DisplayError::InvalidCoordinates => write!(f, "display coordinates out of range"),
        }
    }
}

/// Text colors
///
/// The CDU face is monochrome green; backends map these to their palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Full brightness green
    #[default]
    Bright,
    /// Dimmed green
    Dim,
    /// Red, for faults
    Alert,
}

/// Text attributes for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub color: Color,
    /// Swap foreground and background (selection highlight)
    pub inverse: bool,
}

impl Style {
    /// Plain text in the given color
    pub const fn plain(color: Color) -> Self {
        Self {
            color,
            inverse: false,
        }
    }

    /// Highlighted text in the given color
    pub const fn inverse(color: Color) -> Self {
        Self {
            color,
            inverse: true,
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering text.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display, clipped at the right edge
    fn draw_text(&mut self, row: u8, col: u8, text: &str, style: Style) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;
}
