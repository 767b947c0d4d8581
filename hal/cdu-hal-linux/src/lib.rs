//! Linux HAL for the CDU controller
//!
//! This crate provides Linux implementations of the shared `cdu-hal`
//! traits on top of `linux-embedded-hal`:
//!
//! - I2C bus access through `/dev/i2c-*` (implements `cdu_hal::I2cBus`)
//! - GPIO input lines through `/dev/gpiochip*` (implements `cdu_hal::InputPin`)
//! - Pin string parsing for config-driven setup

pub mod gpio;
pub mod i2c;

use core::fmt;

pub use gpio::{parse_pin_string, LinuxInputPin, PinSpec};
pub use i2c::{I2cBusError, LinuxI2c};

// Re-export shared traits from cdu-hal for convenience
pub use cdu_hal::{I2cBus, InputPin};

/// Errors raised while acquiring hardware handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// The I2C character device could not be opened
    I2cOpen(String),
    /// The GPIO chip or line could not be requested
    GpioRequest(String),
    /// A pin string in the configuration is malformed
    InvalidPin,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::I2cOpen(e) => write!(f, "failed to open I2C bus: {e}"),
            HalError::GpioRequest(e) => write!(f, "failed to request GPIO line: {e}"),
            HalError::InvalidPin => write!(f, "invalid pin string"),
        }
    }
}

impl std::error::Error for HalError {}
