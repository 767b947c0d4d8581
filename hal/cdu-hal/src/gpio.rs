//! GPIO pin abstractions

/// Digital input pin
///
/// Reads go through the operating system on Linux targets, so they can
/// fail and take `&mut self`.
pub trait InputPin {
    /// Error type for pin reads
    type Error;

    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}
