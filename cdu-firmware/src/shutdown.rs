//! External power-off action

use std::process::Command;

use log::{info, warn};

use crate::error::Error;

/// Run the configured shutdown command line
///
/// The line is split on whitespace; no shell is involved. An empty command
/// does nothing.
pub fn run_command(command: &str) -> Result<(), Error> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        warn!("No shutdown command configured");
        return Ok(());
    };

    info!("Running shutdown command: {}", command);
    let status = Command::new(program).args(parts).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Shutdown(status.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_noop() {
        assert!(run_command("   ").is_ok());
    }

    #[test]
    fn test_command_status() {
        assert!(run_command("true").is_ok());
        assert!(matches!(run_command("false"), Err(Error::Shutdown(Some(1)))));
    }

    #[test]
    fn test_missing_program_is_io_error() {
        assert!(matches!(
            run_command("/nonexistent/cdu-poweroff now"),
            Err(Error::Io(_))
        ));
    }
}
