//! Top-level firmware errors

use core::fmt;

use cdu_display::DisplayError;
use cdu_drivers::matrix::ScanError;
use cdu_hal_linux::{HalError, I2cBusError};
use embedded_hal::digital::ErrorKind as PinErrorKind;

use crate::config::ConfigError;

/// Matrix scan error with the Linux HAL's error types
pub type LinuxScanError = ScanError<I2cBusError, PinErrorKind>;

/// Anything that stops the firmware
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded
    Config(ConfigError),
    /// Hardware handle could not be acquired
    Hal(HalError),
    /// Key matrix scan failed
    Scan(LinuxScanError),
    /// Terminal display failed
    Display(DisplayError),
    /// Logger could not be installed
    Logger(String),
    /// OS-level I/O failure
    Io(std::io::Error),
    /// Shutdown command exited unsuccessfully
    Shutdown(Option<i32>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration: {}", e),
            Error::Hal(e) => write!(f, "hardware: {}", e),
            Error::Scan(e) => write!(f, "matrix scan: {}", e),
            Error::Display(e) => write!(f, "display: {}", e),
            Error::Logger(e) => write!(f, "logger: {}", e),
            Error::Io(e) => write!(f, "I/O: {}", e),
            Error::Shutdown(Some(code)) => write!(f, "shutdown command exited with {}", code),
            Error::Shutdown(None) => write!(f, "shutdown command killed by signal"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HalError> for Error {
    fn from(e: HalError) -> Self {
        Error::Hal(e)
    }
}

impl From<LinuxScanError> for Error {
    fn from(e: LinuxScanError) -> Self {
        Error::Scan(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
