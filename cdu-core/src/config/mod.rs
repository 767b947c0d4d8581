//! Configuration types
//!
//! Board-agnostic configuration structures, deserialized from TOML by the
//! firmware when the `serde` feature is enabled.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
