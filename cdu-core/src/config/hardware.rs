//! Hardware configuration types
//!
//! Describe where the key matrix and display live. The firmware turns
//! these into device handles at startup.

use heapless::String;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Maximum length of a device path
pub const MAX_PATH_LEN: usize = 64;

/// Key matrix wiring
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixConfig {
    /// I2C character device of the port expander
    pub i2c_bus: String<MAX_PATH_LEN>,
    /// 7-bit I2C address of the MCP23017 (A0-A2 strapping)
    pub address: u8,
    /// GPIO chip carrying the extra matrix row
    pub gpio_chip: String<MAX_PATH_LEN>,
    /// Pin of the extra row, e.g. "gpio4" or "!gpio4" for active-low
    pub extra_row_pin: String<16>,
    /// Wait after driving a column before sampling rows (ms)
    pub settle_delay_ms: u32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            i2c_bus: text("/dev/i2c-1"),
            address: 0x20,
            gpio_chip: text("/dev/gpiochip0"),
            extra_row_pin: text("gpio4"),
            settle_delay_ms: 1,
        }
    }
}

/// Terminal display placement and palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Terminal column of the CDU window's left edge
    pub origin_col: u16,
    /// Terminal row of the CDU window's top edge
    pub origin_row: u16,
    /// 256-color index for bright text
    pub bright_color: u8,
    /// 256-color index for dimmed text
    pub dim_color: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            origin_col: 4,
            origin_row: 0,
            bright_color: 10,
            dim_color: 22,
        }
    }
}

/// Build a bounded string from a literal, truncating at capacity
pub(crate) fn text<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
