//! I2C port expanders

pub mod mcp23017;

pub use mcp23017::{ExpanderError, Mcp23017};
