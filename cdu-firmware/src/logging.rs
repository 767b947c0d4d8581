//! Logger setup
//!
//! Log lines go to a file: stdout belongs to the terminal display.

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::error::Error;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Install the global logger, appending to `path`
pub fn init(path: &str) -> Result<(), Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| Error::Logger(e.to_string()))
}
