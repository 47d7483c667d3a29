//! Command dispatch: routes parsed CLI commands to handlers.

pub mod config_cmd;
pub mod data;
pub mod devices;
pub mod signals;
pub mod sites;

use breeze_core::Breeze;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command that needs a live connection.
pub fn dispatch(cmd: Command, api: &mut Breeze, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Sites => sites::handle(api, global),
        Command::Devices(args) => devices::handle(api, &args, global),
        Command::Signals => signals::handle(api, global),
        Command::Data(args) => data::handle(api, &args, global),
        // Handled in main without a connection.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
