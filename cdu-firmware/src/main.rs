//! CDU - replica Control Display Unit controller
//!
//! Scans the CDU key matrix, mirrors the simulator's CDU text onto a
//! terminal, and exchanges key events and lighting levels with the
//! simulation host over MQTT.

mod bus;
mod channels;
mod config;
mod error;
mod logging;
mod shutdown;
mod tasks;

use embassy_executor::Spawner;
use embassy_time::Delay;
use log::{error, info, warn};
use static_cell::StaticCell;

use cdu_core::config::CduConfig;
use cdu_display_term::{Palette, TerminalDisplay};
use cdu_drivers::expander::Mcp23017;
use cdu_drivers::matrix::MatrixScanner;
use cdu_hal_linux::{parse_pin_string, HalError, LinuxI2c, LinuxInputPin};

use crate::bus::BusHandle;
use crate::config::ConfigSource;
use crate::error::Error;
use crate::tasks::control::{Display, Scanner};

// Configuration must live forever for task references
static CONFIG: StaticCell<CduConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let (config, scanner, display, bus) = match init() {
        Ok(parts) => parts,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("cdu: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = spawner.spawn(tasks::control_task(scanner, display, bus, config)) {
        error!("Failed to spawn control task: {:?}", e);
        std::process::exit(1);
    }
    info!("All tasks spawned");
}

/// Bring up logging, hardware, display and bus, in that order
fn init() -> Result<(&'static CduConfig, Scanner, Display, BusHandle), Error> {
    let loaded = config::load()?;
    logging::init(&loaded.config.system.log_file)?;
    info!("CDU controller starting...");

    match &loaded.source {
        ConfigSource::Embedded => info!("Using embedded configuration"),
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Fallback { path, reason } => {
            warn!("Cannot read {} ({}), using embedded configuration", path.display(), reason)
        }
    }
    let config: &'static CduConfig = CONFIG.init(loaded.config);

    let scanner = open_scanner(config)?;
    info!("Key matrix ready");

    let display = TerminalDisplay::stdout(
        (config.display.origin_col, config.display.origin_row),
        Palette {
            bright: config.display.bright_color,
            dim: config.display.dim_color,
            ..Palette::default()
        },
    )?;

    let bus = BusHandle::start(&config.bus, &config.topics)?;
    Ok((config, scanner, display, bus))
}

fn open_scanner(config: &CduConfig) -> Result<Scanner, Error> {
    let matrix = &config.matrix;

    let i2c = LinuxI2c::open(matrix.i2c_bus.as_str())?;
    let spec = parse_pin_string(&matrix.extra_row_pin).ok_or(HalError::InvalidPin)?;
    let row_pin = LinuxInputPin::open(matrix.gpio_chip.as_str(), spec)?;

    let expander = Mcp23017::new(i2c, matrix.address);
    let mut scanner = MatrixScanner::new(expander, row_pin, Delay, matrix.settle_delay_ms);
    scanner.init()?;
    Ok(scanner)
}
