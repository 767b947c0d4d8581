//! Page state machine definition
//!
//! What the display shows, and whether key events leave the box, is a
//! function of the current page.

use core::fmt;

use super::events::Event;

/// Broker connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityMode {
    /// No broker session
    #[default]
    Disconnected,
    /// Broker session established
    Connected,
}

impl ConnectivityMode {
    /// Check if a broker session is up
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityMode::Connected)
    }
}

/// CDU pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// SIM chosen but no broker session
    Connecting,
    /// Broker session up, no telemetry yet
    Waiting,
    /// Local menu
    #[default]
    Menu,
    /// Mirroring the simulator CDU
    Sim,
    /// Key matrix diagnostic view
    Matrix,
}

impl Page {
    /// Check if telemetry may paint this page
    pub fn shows_telemetry(&self) -> bool {
        matches!(self, Page::Sim)
    }

    /// Check if key events are forwarded to the simulator on this page
    pub fn forwards_keys(&self) -> bool {
        matches!(self, Page::Sim)
    }

    /// Check if holding the select key returns to the menu from this page
    pub fn accepts_long_press(&self) -> bool {
        !matches!(self, Page::Menu)
    }

    /// Process an event and return the next page
    ///
    /// This is the core page transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Page::*;

        match (self, event) {
            // Session (re)established while mirroring or waiting to connect
            (Sim, BusConnected) => Waiting,
            (Connecting, BusConnected) => Waiting,

            // Session lost while mirroring or waiting for telemetry
            (Sim, BusDisconnected) => Connecting,
            (Waiting, BusDisconnected) => Connecting,

            // First telemetry
            (Waiting, TelemetryReceived) => Sim,

            // Menu commits
            (Menu, SelectSim { connected: true }) => Sim,
            (Menu, SelectSim { connected: false }) => Connecting,
            (Menu, SelectMatrix) => Matrix,

            // Return to menu
            (Sim | Matrix | Connecting | Waiting, LongPress) => Menu,

            // Default: stay on current page
            _ => self,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Connecting => "Connecting",
            Page::Waiting => "Waiting",
            Page::Menu => "Menu",
            Page::Sim => "Sim",
            Page::Matrix => "Matrix",
        };
        f.write_str(name)
    }
}
