//! I2C bus over the Linux i2c-dev interface

use std::path::Path;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use linux_embedded_hal::I2cdev;

use crate::HalError;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cBusError {
    /// Classified error reported by the kernel driver
    pub kind: ErrorKind,
}

impl core::fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "I2C transfer failed: {:?}", self.kind)
    }
}

/// I2C master on a `/dev/i2c-N` device
pub struct LinuxI2c {
    dev: I2cdev,
}

impl LinuxI2c {
    /// Open an I2C character device (e.g. `/dev/i2c-1`)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HalError> {
        let path = path.as_ref();
        let dev = I2cdev::new(path).map_err(|e| HalError::I2cOpen(e.to_string()))?;
        log::info!("Opened I2C bus {}", path.display());
        Ok(Self { dev })
    }
}

impl cdu_hal::I2cBus for LinuxI2c {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.dev
            .write(address, data)
            .map_err(|e| I2cBusError { kind: e.kind() })
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.dev
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError { kind: e.kind() })
    }
}
