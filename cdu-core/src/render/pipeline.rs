//! Line and brightness handling for the Sim page

use cdu_display::{Color, DisplayBackend, DisplayError, Style, LINE_CAPACITY, SCREEN_COLS};
use cdu_protocol::{decode_line, GlyphError};
use log::{debug, trace};

use super::buffer::DisplayBuffer;
use crate::state::Page;

/// Brightness level for simulator text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveColorLevel {
    /// Full brightness
    #[default]
    Bright,
    /// Night level
    Dim,
}

impl ActiveColorLevel {
    /// Map a brightness code from the simulator
    ///
    /// Only 0 and 2 are meaningful; anything else leaves the level alone.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ActiveColorLevel::Dim),
            2 => Some(ActiveColorLevel::Bright),
            _ => None,
        }
    }

    /// Display color for this level
    pub fn color(&self) -> Color {
        match self {
            ActiveColorLevel::Bright => Color::Bright,
            ActiveColorLevel::Dim => Color::Dim,
        }
    }
}

/// Why a line update was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Payload failed to decode
    Decode(GlyphError),
    /// Row index outside the buffer
    RowOutOfRange,
}

/// Result of applying a line update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Stored and painted
    Painted,
    /// Stored, not on screen
    Stored,
    /// Same content as before
    Unchanged,
    /// Discarded, previous content kept
    Dropped(DropReason),
}

/// Owns the mirrored buffer and the active color
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    buffer: DisplayBuffer,
    level: ActiveColorLevel,
}

impl RenderPipeline {
    /// Create a pipeline with a blank buffer at full brightness
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored content
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Current brightness level
    pub fn level(&self) -> ActiveColorLevel {
        self.level
    }

    /// Apply a raw line update for `row`
    pub fn update_line<D: DisplayBackend>(
        &mut self,
        row: u8,
        payload: &[u8],
        page: Page,
        display: &mut D,
    ) -> Result<LineOutcome, DisplayError> {
        let row = usize::from(row);
        if row >= self.buffer.rows() {
            debug!("line update for row {} dropped: out of range", row);
            return Ok(LineOutcome::Dropped(DropReason::RowOutOfRange));
        }

        let text = match decode_line::<LINE_CAPACITY>(payload, SCREEN_COLS) {
            Ok(text) => text,
            Err(e) => {
                debug!("line update for row {} dropped: {}", row, e);
                return Ok(LineOutcome::Dropped(DropReason::Decode(e)));
            }
        };

        if !self.buffer.set_row(row, &text) {
            return Ok(LineOutcome::Unchanged);
        }
        if !page.shows_telemetry() {
            return Ok(LineOutcome::Stored);
        }

        self.paint_row(row, display)?;
        Ok(LineOutcome::Painted)
    }

    /// Apply a brightness code
    ///
    /// Returns true if the screen was repainted.
    pub fn set_brightness<D: DisplayBackend>(
        &mut self,
        code: i32,
        page: Page,
        display: &mut D,
    ) -> Result<bool, DisplayError> {
        let Some(level) = ActiveColorLevel::from_code(code) else {
            trace!("ignoring brightness code {}", code);
            return Ok(false);
        };
        if level == self.level {
            return Ok(false);
        }

        debug!("brightness {:?} -> {:?}", self.level, level);
        self.level = level;

        if !page.shows_telemetry() {
            return Ok(false);
        }
        self.repaint(display)?;
        Ok(true)
    }

    /// Paint every buffered row in the active color
    pub fn repaint<D: DisplayBackend>(&self, display: &mut D) -> Result<(), DisplayError> {
        for row in 0..self.buffer.rows() {
            self.paint_row(row, display)?;
        }
        Ok(())
    }

    fn paint_row<D: DisplayBackend>(&self, row: usize, display: &mut D) -> Result<(), DisplayError> {
        if let Some(text) = self.buffer.row(row) {
            display.draw_text(row as u8, 0, text, Style::plain(self.level.color()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    /// Backend that records every call
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub draws: Vec<(u8, StdString, Style)>,
        pub clears: usize,
        pub flushes: usize,
    }

    impl Recorder {
        pub fn reset(&mut self) {
            self.draws.clear();
            self.clears = 0;
            self.flushes = 0;
        }
    }

    impl DisplayBackend for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.clears += 1;
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str, style: Style) -> Result<(), DisplayError> {
            self.draws.push((row, text.to_string(), style));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_line_painted_on_sim() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        let outcome = pipeline.update_line(2, b"WP\xBB 1", Page::Sim, &mut display).unwrap();
        assert_eq!(outcome, LineOutcome::Painted);
        assert_eq!(display.draws.len(), 1);
        assert_eq!(display.draws[0].0, 2);
        assert_eq!(display.draws[0].1.trim_end(), "WP\u{2192} 1");
        assert_eq!(display.draws[0].1.chars().count(), SCREEN_COLS);
        assert_eq!(display.draws[0].2, Style::plain(Color::Bright));
    }

    #[test]
    fn test_line_stored_off_sim() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        for page in [Page::Menu, Page::Matrix, Page::Connecting, Page::Waiting] {
            let row = page as u8;
            let outcome = pipeline.update_line(row, b"DATA", page, &mut display).unwrap();
            assert_eq!(outcome, LineOutcome::Stored);
        }
        assert!(display.draws.is_empty());
        assert_eq!(pipeline.buffer().row(0).map(str::trim_end), Some("DATA"));
    }

    #[test]
    fn test_repeated_update_unchanged() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        pipeline.update_line(0, b"SAME", Page::Sim, &mut display).unwrap();
        let before = pipeline.buffer().clone();
        display.reset();

        let outcome = pipeline.update_line(0, b"SAME", Page::Sim, &mut display).unwrap();
        assert_eq!(outcome, LineOutcome::Unchanged);
        assert_eq!(pipeline.buffer(), &before);
        assert!(display.draws.is_empty());
    }

    #[test]
    fn test_invalid_payload_keeps_previous() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        pipeline.update_line(1, b"GOOD", Page::Sim, &mut display).unwrap();
        display.reset();

        let outcome = pipeline.update_line(1, b"BAD\xC3", Page::Sim, &mut display).unwrap();
        assert_eq!(
            outcome,
            LineOutcome::Dropped(DropReason::Decode(GlyphError::InvalidUtf8))
        );
        assert_eq!(pipeline.buffer().row(1).map(str::trim_end), Some("GOOD"));
        assert!(display.draws.is_empty());
    }

    #[test]
    fn test_row_out_of_range_dropped() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        let outcome = pipeline.update_line(10, b"X", Page::Sim, &mut display).unwrap();
        assert_eq!(outcome, LineOutcome::Dropped(DropReason::RowOutOfRange));
        assert!(display.draws.is_empty());
    }

    #[test]
    fn test_dim_repaints_on_sim() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        assert!(pipeline.set_brightness(0, Page::Sim, &mut display).unwrap());
        assert_eq!(pipeline.level(), ActiveColorLevel::Dim);
        assert_eq!(display.draws.len(), 10);
        assert!(display
            .draws
            .iter()
            .all(|(_, _, style)| *style == Style::plain(Color::Dim)));
    }

    #[test]
    fn test_dim_on_menu_no_repaint() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        assert!(!pipeline.set_brightness(0, Page::Menu, &mut display).unwrap());
        assert_eq!(pipeline.level(), ActiveColorLevel::Dim);
        assert!(display.draws.is_empty());
    }

    #[test]
    fn test_unchanged_or_unknown_brightness_ignored() {
        let mut pipeline = RenderPipeline::new();
        let mut display = Recorder::default();

        assert!(!pipeline.set_brightness(2, Page::Sim, &mut display).unwrap());
        assert!(!pipeline.set_brightness(1, Page::Sim, &mut display).unwrap());
        assert!(!pipeline.set_brightness(-5, Page::Sim, &mut display).unwrap());
        assert_eq!(pipeline.level(), ActiveColorLevel::Bright);
        assert!(display.draws.is_empty());
    }
}
