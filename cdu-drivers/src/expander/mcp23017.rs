//! MCP23017 16-bit I/O expander
//!
//! Two 8-bit ports (A and B) behind an I2C interface. The driver assumes
//! the power-on `IOCON.BANK = 0` register layout, where A/B registers are
//! interleaved.
//!
//! # Matrix wiring
//!
//! - Port A drives the matrix columns (outputs, one bit per column)
//! - Port B senses rows 0-7 (inputs)

use core::fmt;

use cdu_hal::I2cBus;

/// MCP23017 register addresses (IOCON.BANK = 0)
pub mod reg {
    /// Port A direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction (1 = input)
    pub const IODIRB: u8 = 0x01;
    /// Port B input level
    pub const GPIOB: u8 = 0x13;
    /// Port A output latch
    pub const OLATA: u8 = 0x14;
}

/// Default 7-bit address with A0-A2 tied low
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Port expander errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderError<E> {
    /// Register write failed
    Write {
        /// Register being written
        register: u8,
        /// Underlying bus error
        source: E,
    },
    /// Register read failed
    Read {
        /// Register being read
        register: u8,
        /// Underlying bus error
        source: E,
    },
}

impl<E: fmt::Debug> fmt::Display for ExpanderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpanderError::Write { register, source } => {
                write!(f, "MCP23017 write to 0x{:02X} failed: {:?}", register, source)
            }
            ExpanderError::Read { register, source } => {
                write!(f, "MCP23017 read of 0x{:02X} failed: {:?}", register, source)
            }
        }
    }
}

/// MCP23017 driver
pub struct Mcp23017<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Mcp23017<B> {
    /// Create a driver for the expander at `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Configure port A as column outputs and port B as row inputs
    ///
    /// The column latch is cleared so no column is driven.
    pub fn init_matrix(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.write(reg::IODIRA, 0x00)?;
        self.write(reg::IODIRB, 0xFF)?;
        self.write(reg::OLATA, 0x00)?;
        log::info!("MCP23017 at 0x{:02X} configured for matrix scan", self.address);
        Ok(())
    }

    /// Drive the port A latch
    pub fn set_port_a(&mut self, value: u8) -> Result<(), ExpanderError<B::Error>> {
        self.write(reg::OLATA, value)
    }

    /// Read port B input levels
    pub fn read_port_b(&mut self) -> Result<u8, ExpanderError<B::Error>> {
        self.read(reg::GPIOB)
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), ExpanderError<B::Error>> {
        self.bus
            .write_register(self.address, register, value)
            .map_err(|source| ExpanderError::Write { register, source })
    }

    fn read(&mut self, register: u8) -> Result<u8, ExpanderError<B::Error>> {
        self.bus
            .read_register(self.address, register)
            .map_err(|source| ExpanderError::Read { register, source })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    extern crate std;
    use std::vec::Vec;

    /// Bus operation seen by [`MockBus`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Op {
        Write(u8, u8, u8),
        Read(u8, u8),
    }

    /// I2C bus that logs operations and answers reads from a script
    #[derive(Default)]
    pub(crate) struct MockBus {
        pub ops: Vec<Op>,
        /// Port B value returned for each column currently latched
        pub port_b: [u8; 8],
        pub latch: u8,
        pub fail_register: Option<u8>,
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            let (register, value) = (data[0], data[1]);
            self.ops.push(Op::Write(address, register, value));
            if self.fail_register == Some(register) {
                return Err(());
            }
            if register == reg::OLATA {
                self.latch = value;
            }
            Ok(())
        }

        fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), ()> {
            let register = write_data[0];
            self.ops.push(Op::Read(address, register));
            if self.fail_register == Some(register) {
                return Err(());
            }
            read_buf[0] = match register {
                reg::GPIOB if self.latch != 0 => self.port_b[self.latch.trailing_zeros() as usize],
                _ => 0,
            };
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut exp = Mcp23017::new(MockBus::default(), DEFAULT_ADDRESS);
        exp.init_matrix().unwrap();

        let bus = exp.release();
        assert_eq!(
            bus.ops,
            [
                Op::Write(0x20, reg::IODIRA, 0x00),
                Op::Write(0x20, reg::IODIRB, 0xFF),
                Op::Write(0x20, reg::OLATA, 0x00),
            ]
        );
    }

    #[test]
    fn test_read_port_b() {
        let mut bus = MockBus::default();
        bus.port_b[2] = 0b1000_0001;
        let mut exp = Mcp23017::new(bus, 0x21);

        exp.set_port_a(1 << 2).unwrap();
        assert_eq!(exp.read_port_b().unwrap(), 0b1000_0001);
    }

    #[test]
    fn test_errors_carry_register() {
        let bus = MockBus {
            fail_register: Some(reg::IODIRB),
            ..Default::default()
        };
        let mut exp = Mcp23017::new(bus, DEFAULT_ADDRESS);
        assert_eq!(
            exp.init_matrix(),
            Err(ExpanderError::Write {
                register: reg::IODIRB,
                source: ()
            })
        );

        let bus = MockBus {
            fail_register: Some(reg::GPIOB),
            ..Default::default()
        };
        let mut exp = Mcp23017::new(bus, DEFAULT_ADDRESS);
        assert_eq!(
            exp.read_port_b(),
            Err(ExpanderError::Read {
                register: reg::GPIOB,
                source: ()
            })
        );
    }
}
