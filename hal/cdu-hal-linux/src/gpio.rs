//! GPIO input lines over the Linux gpio-cdev interface

use std::path::Path;

use embedded_hal::digital::{Error as _, ErrorKind, InputPin as _};
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::CdevPin;

use crate::HalError;

/// Consumer label shown by `gpioinfo` for lines we hold
const CONSUMER: &str = "cdu";

/// A parsed pin reference from config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSpec {
    /// Line offset on the GPIO chip
    pub line: u32,
    /// Active-low: logic 1 is read as electrical low
    pub inverted: bool,
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio4" -> line 4, active-high
/// - "!gpio4" -> line 4, active-low
pub fn parse_pin_string(s: &str) -> Option<PinSpec> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let line = s.strip_prefix("gpio")?.parse().ok()?;
    Some(PinSpec { line, inverted })
}

/// Input line held for the lifetime of this value
///
/// Dropping it releases the line back to the kernel.
pub struct LinuxInputPin {
    pin: CdevPin,
    inverted: bool,
}

impl LinuxInputPin {
    /// Request `spec.line` on the given chip (e.g. `/dev/gpiochip0`) as input
    pub fn open(chip: impl AsRef<Path>, spec: PinSpec) -> Result<Self, HalError> {
        let chip_path = chip.as_ref();
        let handle = Chip::new(chip_path)
            .and_then(|mut chip| chip.get_line(spec.line))
            .and_then(|line| line.request(LineRequestFlags::INPUT, 0, CONSUMER))
            .map_err(|e| HalError::GpioRequest(e.to_string()))?;
        let pin = CdevPin::new(handle).map_err(|e| HalError::GpioRequest(e.to_string()))?;

        log::info!(
            "Requested {} line {} (inverted={})",
            chip_path.display(),
            spec.line,
            spec.inverted
        );
        Ok(Self {
            pin,
            inverted: spec.inverted,
        })
    }
}

impl cdu_hal::InputPin for LinuxInputPin {
    type Error = ErrorKind;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let high = self.pin.is_high().map_err(|e| e.kind())?;
        Ok(high != self.inverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_pin() {
        assert_eq!(
            parse_pin_string("gpio4"),
            Some(PinSpec {
                line: 4,
                inverted: false
            })
        );
    }

    #[test]
    fn test_parse_inverted_pin() {
        assert_eq!(
            parse_pin_string(" !gpio27 "),
            Some(PinSpec {
                line: 27,
                inverted: true
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_pin_string("pin4"), None);
        assert_eq!(parse_pin_string("gpio"), None);
        assert_eq!(parse_pin_string("gpio-1"), None);
    }
}
