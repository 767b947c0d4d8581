//! Configuration file discovery and parsing
//!
//! An embedded default is always available. An override file is taken
//! from `$CDU_CONFIG` if set, else `/etc/cdu/cdu.toml` if it exists.

use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use cdu_core::config::{CduConfig, KeyValue};
use cdu_core::keymap::CDU_LAYOUT;

/// Embedded default configuration (compiled into the binary)
pub const EMBEDDED_CONFIG: &str = include_str!("../../cdu.toml");

/// Environment variable naming an override file
pub const CONFIG_ENV: &str = "CDU_CONFIG";

/// System-wide override file
pub const SYSTEM_CONFIG_PATH: &str = "/etc/cdu/cdu.toml";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// TOML syntax or type error
    Parse(String),
    /// A UI key names a key the matrix does not have
    UnknownKey(String),
    /// A numeric setting is out of range
    InvalidValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid TOML: {}", e),
            ConfigError::UnknownKey(k) => write!(f, "unknown key {}", k),
            ConfigError::InvalidValue(field) => write!(f, "invalid value for {}", field),
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in default
    Embedded,
    /// Override file
    File(PathBuf),
    /// Override file was unreadable, default used instead
    Fallback {
        /// File that failed
        path: PathBuf,
        /// Read error
        reason: String,
    },
}

/// A parsed configuration and its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CduConfig,
    pub source: ConfigSource,
}

/// Find and load the configuration
pub fn load() -> Result<LoadedConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
        let system = PathBuf::from(SYSTEM_CONFIG_PATH);
        system.exists().then_some(system)
    });
    load_from(path.as_deref())
}

/// Load from `path`, or the embedded default when there is none
///
/// An unreadable file falls back to the default. A file that reads but does
/// not parse is an error.
pub fn load_from(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: parse(EMBEDDED_CONFIG)?,
            source: ConfigSource::Embedded,
        });
    };

    match fs::read_to_string(path) {
        Ok(text) => Ok(LoadedConfig {
            config: parse(&text)?,
            source: ConfigSource::File(path.to_path_buf()),
        }),
        Err(e) => Ok(LoadedConfig {
            config: parse(EMBEDDED_CONFIG)?,
            source: ConfigSource::Fallback {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        }),
    }
}

/// Parse and validate TOML text
pub fn parse(text: &str) -> Result<CduConfig, ConfigError> {
    let config: CduConfig = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &CduConfig) -> Result<(), ConfigError> {
    for key in [&config.ui.select, &config.ui.menu_up, &config.ui.menu_down] {
        check_key(key)?;
    }
    if config.ui.long_press_ms == 0 {
        return Err(ConfigError::InvalidValue("ui.long_press_ms"));
    }
    if config.backlight.max_raw <= 0 {
        return Err(ConfigError::InvalidValue("backlight.max_raw"));
    }
    Ok(())
}

fn check_key(key: &KeyValue) -> Result<(), ConfigError> {
    if CDU_LAYOUT.contains(key.key.as_str()) {
        Ok(())
    } else {
        Err(ConfigError::UnknownKey(key.key.as_str().into()))
    }
}
