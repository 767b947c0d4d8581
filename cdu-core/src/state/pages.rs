//! Static page content
//!
//! Each builder fills a [`Screen`] that is painted once on page entry.

use core::fmt::Write;

use cdu_display::{Screen, LINE_CAPACITY, SCREEN_COLS};
use heapless::String;

use super::menu::MenuSelection;
use crate::keymap::{KeyState, MATRIX_COLS, MATRIX_ROWS};

/// Row holding the first line of the two-line status pages
const STATUS_ROW: usize = 4;

/// Row of the first menu entry
const MENU_FIRST_ROW: usize = 3;

/// "Connecting to MQTT at" / "host:port"
pub fn connecting(host: &str, port: u16) -> Screen {
    let mut screen = Screen::new();
    let mut port_text: String<6> = String::new();
    let _ = write!(port_text, ":{}", port);

    // Clipped to the screen width
    let mut addr: String<LINE_CAPACITY> = String::new();
    for c in host.chars().chain(port_text.chars()).take(SCREEN_COLS) {
        let _ = addr.push(c);
    }

    screen.set_centered(STATUS_ROW, "Connecting to MQTT at");
    screen.set_centered(STATUS_ROW + 1, &addr);
    screen
}

/// "Connected to MQTT" / "Waiting for telemetry..."
pub fn waiting(code: u8) -> Screen {
    let mut screen = Screen::new();
    let mut title: String<SCREEN_COLS> = String::new();
    let _ = write!(title, "Connected to MQTT ({})", code);

    screen.set_centered(STATUS_ROW, &title);
    screen.set_centered(STATUS_ROW + 1, "Waiting for telemetry...");
    screen
}

/// Menu title and entries, the selected entry highlighted
pub fn menu(selected: MenuSelection) -> Screen {
    let mut screen = Screen::new();
    screen.set_centered(0, "CDU MENU");

    for entry in MenuSelection::ALL {
        let row = MENU_FIRST_ROW + entry.index() * 2;
        screen.set_centered(row, entry.label());
        screen.set_highlight(row, entry == selected);
    }
    screen
}

/// Key level grid with the most recent key event on the title row
///
/// Row `r + 1` holds matrix row `r`, one character per column.
pub fn matrix(state: &KeyState, last_key: Option<(&str, i32)>) -> Screen {
    let mut screen = Screen::new();

    let mut title: String<SCREEN_COLS> = String::new();
    let _ = title.push_str("MATRIX");
    if let Some((name, value)) = last_key {
        let _ = write!(title, " {}={}", name, value);
    }
    screen.set_line(0, &title);

    for row in 0..MATRIX_ROWS {
        let mut line: String<SCREEN_COLS> = String::new();
        let _ = write!(line, "R{} ", row);
        for col in 0..MATRIX_COLS {
            let mark = if state.level(row, col) != 0 { '1' } else { '.' };
            let _ = line.push(' ');
            let _ = line.push(mark);
        }
        screen.set_line(row + 1, &line);
    }
    screen
}

/// Shown while the unit powers off
pub fn shutdown() -> Screen {
    let mut screen = Screen::new();
    screen.set_centered(STATUS_ROW, "Shutting down...");
    screen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connecting_shows_address() {
        let screen = connecting("192.168.0.174", 1883);
        assert_eq!(screen.get_line(4).map(str::trim), Some("Connecting to MQTT at"));
        assert_eq!(screen.get_line(5).map(str::trim), Some("192.168.0.174:1883"));
        assert_eq!(screen.get_line(0), Some(""));
    }

    #[test]
    fn test_connecting_clips_long_host() {
        let screen = connecting("mqtt-broker.cockpit.home.lan", 1883);
        assert_eq!(screen.get_line(5), Some("mqtt-broker.cockpit.home"));
    }

    #[test]
    fn test_waiting_shows_code() {
        let screen = waiting(0);
        assert_eq!(screen.get_line(4).map(str::trim), Some("Connected to MQTT (0)"));
        assert_eq!(screen.get_line(5).map(str::trim), Some("Waiting for telemetry..."));
    }

    #[test]
    fn test_menu_highlights_selection() {
        let screen = menu(MenuSelection::Matrix);
        assert_eq!(screen.get_line(3).map(str::trim), Some("SIM"));
        assert_eq!(screen.get_line(5).map(str::trim), Some("MATRIX"));
        assert_eq!(screen.get_line(7).map(str::trim), Some("SHUTDOWN"));
        assert!(!screen.is_highlighted(3));
        assert!(screen.is_highlighted(5));
        assert!(!screen.is_highlighted(7));
    }

    #[test]
    fn test_matrix_grid() {
        let state = KeyState::default();
        let screen = matrix(&state, Some(("CDU_A", 1)));
        assert_eq!(screen.get_line(0), Some("MATRIX CDU_A=1"));
        assert_eq!(screen.get_line(1), Some("R0  . . . . . . . ."));
        assert_eq!(screen.get_line(9), Some("R8  . . . . . . . ."));
    }

    #[test]
    fn test_matrix_without_key() {
        let screen = matrix(&KeyState::default(), None);
        assert_eq!(screen.get_line(0), Some("MATRIX"));
    }
}
