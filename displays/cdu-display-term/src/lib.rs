//! Terminal display backend
//!
//! Renders the CDU face into a fixed window of a terminal using crossterm.
//! The Pi boots straight into a console on the CDU's LCD, so the "display"
//! is a 24 x 10 region of that console, offset by a configurable origin.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use cdu_display::{Color, DisplayBackend, DisplayError, Style, SCREEN_COLS, SCREEN_ROWS};

/// 256-color palette indices for each logical color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Index used for bright text
    pub bright: u8,
    /// Index used for dimmed text
    pub dim: u8,
    /// Index used for alerts
    pub alert: u8,
}

impl Default for Palette {
    fn default() -> Self {
        // 10 = bright green, 22 = dark green, 9 = bright red
        Self {
            bright: 10,
            dim: 22,
            alert: 9,
        }
    }
}

impl Palette {
    fn term_color(&self, color: Color) -> TermColor {
        let index = match color {
            Color::Bright => self.bright,
            Color::Dim => self.dim,
            Color::Alert => self.alert,
        };
        TermColor::AnsiValue(index)
    }
}

/// Terminal window used as the CDU display
pub struct TerminalDisplay<W: Write> {
    out: W,
    /// Top-left corner of the CDU window (column, row)
    origin: (u16, u16),
    palette: Palette,
    active: bool,
}

impl TerminalDisplay<io::Stdout> {
    /// Take over stdout
    pub fn stdout(origin: (u16, u16), palette: Palette) -> Result<Self, DisplayError> {
        Self::new(io::stdout(), origin, palette)
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Switch the terminal to the alternate screen and hide the cursor
    pub fn new(mut out: W, origin: (u16, u16), palette: Palette) -> Result<Self, DisplayError> {
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)).map_err(io_error)?;
        log::debug!("Terminal display at origin {:?}", origin);
        Ok(Self {
            out,
            origin,
            palette,
            active: true,
        })
    }

    /// Give the terminal back: show the cursor and leave the alternate screen
    pub fn restore(&mut self) -> Result<(), DisplayError> {
        if self.active {
            self.active = false;
            execute!(self.out, ResetColor, Show, LeaveAlternateScreen).map_err(io_error)?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl<W: Write> DisplayBackend for TerminalDisplay<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        queue!(self.out, ResetColor, Clear(ClearType::All)).map_err(io_error)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str, style: Style) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        let room = SCREEN_COLS - col as usize;
        let clipped = match text.char_indices().nth(room) {
            Some((end, _)) => &text[..end],
            None => text,
        };

        let x = self.origin.0 + col as u16;
        let y = self.origin.1 + row as u16;
        queue!(
            self.out,
            MoveTo(x, y),
            SetForegroundColor(self.palette.term_color(style.color)),
            SetBackgroundColor(TermColor::Black),
        )
        .map_err(io_error)?;
        if style.inverse {
            queue!(self.out, SetAttribute(Attribute::Reverse)).map_err(io_error)?;
        }
        queue!(self.out, Print(clipped), SetAttribute(Attribute::Reset), ResetColor).map_err(io_error)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.out.flush().map_err(io_error)
    }
}

fn io_error(e: io::Error) -> DisplayError {
    log::error!("Terminal write failed: {}", e);
    DisplayError::Communication
}
