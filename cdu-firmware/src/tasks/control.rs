//! Control task
//!
//! Owns the [`CduContext`]. Each cycle scans the matrix, drains bus events,
//! runs the key and page logic, and publishes whatever was queued.

use std::io::Stdout;

use embassy_time::{Delay, Instant};
use log::{error, info, warn};

use cdu_core::config::CduConfig;
use cdu_core::{CduContext, TickOutcome};
use cdu_display::DisplayBackend;
use cdu_display_term::TerminalDisplay;
use cdu_drivers::matrix::MatrixScanner;
use cdu_hal_linux::{LinuxI2c, LinuxInputPin};

use crate::bus::BusHandle;
use crate::channels::INBOUND;
use crate::error::Error;
use crate::shutdown;

/// Matrix scanner on the Linux HAL
pub type Scanner = MatrixScanner<LinuxI2c, LinuxInputPin, Delay>;

/// Terminal display on stdout
pub type Display = TerminalDisplay<Stdout>;

/// Control task - main loop
///
/// Never returns: the process exits once the loop ends, with status 0 after
/// a menu shutdown and 1 after a fatal error.
#[embassy_executor::task]
pub async fn control_task(
    mut scanner: Scanner,
    mut display: Display,
    mut bus: BusHandle,
    config: &'static CduConfig,
) {
    info!("Control task started");

    let mut ctx = CduContext::new(config);
    let result = run(&mut ctx, &mut scanner, &mut display, &mut bus).await;

    // Teardown order: bus, hardware, terminal
    bus.shutdown();
    drop(scanner);
    if let Err(e) = display.restore() {
        warn!("Terminal restore failed: {}", e);
    }

    let status = match result {
        Ok(()) => match shutdown::run_command(&config.system.shutdown_command) {
            Ok(()) => 0,
            Err(e) => {
                error!("{}", e);
                eprintln!("cdu: {}", e);
                1
            }
        },
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("cdu: {}", e);
            1
        }
    };
    std::process::exit(status);
}

/// Loop until SHUTDOWN is committed or something fails
async fn run<D: DisplayBackend>(
    ctx: &mut CduContext,
    scanner: &mut Scanner,
    display: &mut D,
    bus: &mut BusHandle,
) -> Result<(), Error> {
    loop {
        let sample = scanner.scan().await?;

        while let Ok(event) = INBOUND.try_receive() {
            ctx.handle_bus_event(event, display)?;
        }

        let outcome = ctx.tick(&sample, Instant::now().as_millis(), display)?;

        while let Some(msg) = ctx.next_outbound() {
            bus.publish(&msg);
        }

        if outcome == TickOutcome::Shutdown {
            info!("Shutdown selected");
            return Ok(());
        }

        embassy_futures::yield_now().await;
    }
}
