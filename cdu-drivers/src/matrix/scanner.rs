//! Column-driven key matrix scanner
//!
//! Each cycle drives one column high at a time through the expander's
//! port A, waits for the lines to settle, and samples the rows: port B for
//! rows 0-7 and a discrete GPIO line for row 8.

use core::fmt;

use cdu_core::keymap::{MatrixSample, MATRIX_COLS};
use cdu_hal::{I2cBus, InputPin};
use embedded_hal_async::delay::DelayNs;

use crate::expander::{ExpanderError, Mcp23017};

/// Bit of the GPIO row within a column word
const GPIO_ROW_BIT: u16 = 1 << 8;

/// Scan failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError<BE, PE> {
    /// Port expander access failed
    Expander(ExpanderError<BE>),
    /// Extra row line could not be read
    RowPin(PE),
}

impl<BE, PE> From<ExpanderError<BE>> for ScanError<BE, PE> {
    fn from(e: ExpanderError<BE>) -> Self {
        ScanError::Expander(e)
    }
}

impl<BE: fmt::Debug, PE: fmt::Debug> fmt::Display for ScanError<BE, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Expander(e) => write!(f, "{}", e),
            ScanError::RowPin(e) => write!(f, "extra row read failed: {:?}", e),
        }
    }
}

/// Matrix scanner over an MCP23017 and one GPIO input
pub struct MatrixScanner<B, P, D> {
    expander: Mcp23017<B>,
    row_pin: P,
    delay: D,
    settle_ms: u32,
}

impl<B, P, D> MatrixScanner<B, P, D>
where
    B: I2cBus,
    P: InputPin,
    D: DelayNs,
{
    /// Create a scanner; call [`init`](Self::init) before the first scan
    pub fn new(expander: Mcp23017<B>, row_pin: P, delay: D, settle_ms: u32) -> Self {
        Self {
            expander,
            row_pin,
            delay,
            settle_ms,
        }
    }

    /// Configure the expander for scanning
    pub fn init(&mut self) -> Result<(), ScanError<B::Error, P::Error>> {
        self.expander.init_matrix()?;
        Ok(())
    }

    /// Sample every key once
    ///
    /// Columns are visited in order. The latch is cleared afterwards so
    /// every cycle starts from the same state.
    pub async fn scan(&mut self) -> Result<MatrixSample, ScanError<B::Error, P::Error>> {
        let mut sample = MatrixSample::new();

        for col in 0..MATRIX_COLS {
            self.expander.set_port_a(1 << col)?;
            self.delay.delay_ms(self.settle_ms).await;

            let port_b = self.expander.read_port_b()?;
            let extra = self.row_pin.is_high().map_err(ScanError::RowPin)?;

            let mut rows = u16::from(port_b);
            if extra {
                rows |= GPIO_ROW_BIT;
            }
            sample.set_column(col, rows);
        }

        self.expander.set_port_a(0)?;
        Ok(sample)
    }

    /// Release the hardware handles
    pub fn release(self) -> (Mcp23017<B>, P) {
        (self.expander, self.row_pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::expander::mcp23017::reg;
    use crate::expander::mcp23017::tests::{MockBus, Op};
    use embassy_futures::block_on;

    extern crate std;
    use std::vec::Vec;

    /// Pin whose level follows the column latched on the mock bus
    struct ScriptPin {
        /// Level per scan call, in column order
        levels: Vec<bool>,
        reads: usize,
        fail: bool,
    }

    impl ScriptPin {
        fn new(levels: &[bool]) -> Self {
            Self {
                levels: levels.to_vec(),
                reads: 0,
                fail: false,
            }
        }
    }

    impl InputPin for ScriptPin {
        type Error = &'static str;

        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                return Err("line gone");
            }
            let level = self.levels.get(self.reads).copied().unwrap_or(false);
            self.reads += 1;
            Ok(level)
        }
    }

    /// Delay that returns immediately and counts calls
    #[derive(Default)]
    struct NoDelay {
        calls: Vec<u32>,
    }

    impl DelayNs for NoDelay {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.calls.push(ms);
        }
    }

    fn scanner(bus: MockBus, pin: ScriptPin) -> MatrixScanner<MockBus, ScriptPin, NoDelay> {
        MatrixScanner::new(Mcp23017::new(bus, 0x20), pin, NoDelay::default(), 1)
    }

    #[test]
    fn test_columns_in_order_then_cleared() {
        let mut s = scanner(MockBus::default(), ScriptPin::new(&[]));
        block_on(s.scan()).unwrap();

        let delay_calls = s.delay.calls.len();
        let (exp, _) = s.release();
        let writes: Vec<u8> = exp
            .release()
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(_, r, v) if *r == reg::OLATA => Some(*v),
                _ => None,
            })
            .collect();

        assert_eq!(writes, [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x00]);
        assert_eq!(delay_calls, MATRIX_COLS);
    }

    #[test]
    fn test_reads_follow_each_write() {
        let mut s = scanner(MockBus::default(), ScriptPin::new(&[]));
        block_on(s.scan()).unwrap();

        let (exp, _) = s.release();
        let ops = exp.release().ops;
        assert_eq!(ops[0], Op::Write(0x20, reg::OLATA, 0x01));
        assert_eq!(ops[1], Op::Read(0x20, reg::GPIOB));
        assert_eq!(ops[2], Op::Write(0x20, reg::OLATA, 0x02));
        assert_eq!(ops.len(), MATRIX_COLS * 2 + 1);
    }

    #[test]
    fn test_merges_port_b_and_gpio_row() {
        let mut bus = MockBus::default();
        bus.port_b[0] = 0b0000_0001; // row 0, col 0
        bus.port_b[7] = 0b1000_0000; // row 7, col 7

        // Row 8 high only while column 3 is driven
        let pin = ScriptPin::new(&[false, false, false, true]);
        let mut s = scanner(bus, pin);
        let sample = block_on(s.scan()).unwrap();

        assert_eq!(sample.level(0, 0), 1);
        assert_eq!(sample.level(7, 7), 1);
        assert_eq!(sample.level(8, 3), 1);
        assert_eq!(sample.level(8, 0), 0);
        assert_eq!(sample.level(0, 1), 0);
    }

    #[test]
    fn test_settle_delay_passed_through() {
        let mut s = MatrixScanner::new(
            Mcp23017::new(MockBus::default(), 0x20),
            ScriptPin::new(&[]),
            NoDelay::default(),
            3,
        );
        block_on(s.scan()).unwrap();
        assert!(s.delay.calls.iter().all(|ms| *ms == 3));
    }

    #[test]
    fn test_bus_failure_is_error() {
        let bus = MockBus {
            fail_register: Some(reg::GPIOB),
            ..Default::default()
        };
        let mut s = scanner(bus, ScriptPin::new(&[]));
        assert_eq!(
            block_on(s.scan()),
            Err(ScanError::Expander(ExpanderError::Read {
                register: reg::GPIOB,
                source: ()
            }))
        );
    }

    #[test]
    fn test_pin_failure_is_error() {
        let mut pin = ScriptPin::new(&[]);
        pin.fail = true;
        let mut s = scanner(MockBus::default(), pin);
        assert_eq!(block_on(s.scan()), Err(ScanError::RowPin("line gone")));
    }

    #[test]
    fn test_init_configures_ports() {
        let mut s = scanner(MockBus::default(), ScriptPin::new(&[]));
        s.init().unwrap();
        let (exp, _) = s.release();
        assert_eq!(exp.release().ops[1], Op::Write(0x20, reg::IODIRB, 0xFF));
    }
}
