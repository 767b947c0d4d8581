//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by platform HALs.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write a single 8-bit register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }

    /// Read a single 8-bit register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register file backed bus for exercising the provided methods
    struct RegisterBus {
        regs: [u8; 32],
        last_address: u8,
    }

    impl I2cBus for RegisterBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            self.last_address = address;
            match data {
                [reg, value] => {
                    self.regs[*reg as usize] = *value;
                    Ok(())
                }
                _ => Err(()),
            }
        }

        fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), ()> {
            self.last_address = address;
            let reg = *write_data.first().ok_or(())? as usize;
            read_buf[0] = self.regs[reg];
            Ok(())
        }
    }

    #[test]
    fn test_register_roundtrip() {
        let mut bus = RegisterBus {
            regs: [0; 32],
            last_address: 0,
        };

        bus.write_register(0x20, 0x14, 0x80).unwrap();
        assert_eq!(bus.last_address, 0x20);
        assert_eq!(bus.read_register(0x20, 0x14), Ok(0x80));
        assert_eq!(bus.read_register(0x20, 0x13), Ok(0x00));
    }
}
