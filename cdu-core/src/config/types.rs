//! Configuration type definitions

use heapless::String;

use cdu_protocol::TopicConfig;

use super::hardware::{text, DisplayConfig, MatrixConfig, MAX_PATH_LEN};

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Maximum key name length
pub const MAX_KEY_NAME_LEN: usize = 16;

/// Maximum host name length
pub const MAX_HOST_LEN: usize = 64;

/// Full controller configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CduConfig {
    /// Broker connection
    pub bus: BusConfig,
    /// Topic names
    pub topics: TopicConfig,
    /// Display placement
    pub display: DisplayConfig,
    /// Key matrix wiring
    pub matrix: MatrixConfig,
    /// Menu and gesture keys
    pub ui: UiConfig,
    /// Backlight pass-through
    pub backlight: BacklightConfig,
    /// Process-level settings
    pub system: SystemConfig,
}

/// MQTT broker connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    /// Broker host name or address
    pub host: String<MAX_HOST_LEN>,
    /// Broker port
    pub port: u16,
    /// MQTT client identifier
    pub client_id: String<32>,
    /// Keep-alive interval (seconds)
    pub keep_alive_s: u16,
    /// Pause between reconnect attempts (ms)
    pub reconnect_delay_ms: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            host: text("192.168.0.174"),
            port: 1883,
            client_id: text("cdu"),
            keep_alive_s: 60,
            reconnect_delay_ms: 1000,
        }
    }
}

/// A key name together with one of its event values
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct KeyValue {
    /// Logical key name as emitted by the key mapper
    pub key: String<MAX_KEY_NAME_LEN>,
    /// Event value
    pub value: i32,
}

impl KeyValue {
    /// Build from a literal name
    pub fn new(key: &str, value: i32) -> Self {
        Self {
            key: text(key),
            value,
        }
    }

    /// Check whether an event is this exact key/value pair
    pub fn matches(&self, name: &str, value: i32) -> bool {
        self.key.as_str() == name && self.value == value
    }

    /// Check whether an event belongs to this key, whatever its value
    pub fn is_key(&self, name: &str) -> bool {
        self.key.as_str() == name
    }
}

/// Menu navigation and gesture keys
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiConfig {
    /// Key and down value that commits the menu selection; holding it
    /// returns to the menu
    pub select: KeyValue,
    /// Event that moves the menu cursor toward the top entry
    pub menu_up: KeyValue,
    /// Event that moves the menu cursor toward the bottom entry
    pub menu_down: KeyValue,
    /// Hold time for the return-to-menu gesture (ms)
    pub long_press_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            select: KeyValue::new("CDU_FA", 1),
            menu_up: KeyValue::new("CDU_PG", 2),
            menu_down: KeyValue::new("CDU_PG", 0),
            long_press_ms: 5000,
        }
    }
}

/// Auxiliary instrument brightness to backlight translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BacklightConfig {
    /// Hardware PWM pin addressed in the backlight payload
    pub pin: u8,
    /// Raw telemetry value corresponding to full brightness
    pub max_raw: i32,
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            pin: 18,
            max_raw: 65535,
        }
    }
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemConfig {
    /// File receiving log output (keeps the terminal clean)
    pub log_file: String<MAX_PATH_LEN>,
    /// Command run when SHUTDOWN is chosen from the menu
    pub shutdown_command: String<MAX_PATH_LEN>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_file: text("/tmp/cdu.log"),
            shutdown_command: text("sudo shutdown -h now"),
        }
    }
}
