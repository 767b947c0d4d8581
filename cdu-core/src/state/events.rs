//! Events that trigger page transitions

/// Events that can trigger page transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Bus events
    /// Broker connection established
    BusConnected,
    /// Broker connection lost
    BusDisconnected,
    /// Any simulator telemetry arrived
    TelemetryReceived,

    // Menu events
    /// SIM committed from the menu
    SelectSim {
        /// Broker connection state at commit time
        connected: bool,
    },
    /// MATRIX committed from the menu
    SelectMatrix,

    // Gesture events
    /// Select key held past the long-press threshold
    LongPress,
}
