//! Configuration loading
//!
//! Type definitions live in `cdu_core::config`; this module finds and
//! parses the TOML file.

pub mod loader;

pub use loader::{load, ConfigError, ConfigSource, LoadedConfig};
