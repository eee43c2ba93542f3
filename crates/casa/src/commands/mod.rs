//! Command dispatch: bridges CLI args -> `Casa` calls -> output formatting.

pub mod config_cmd;
pub mod connection;
pub mod devices;
pub mod overview;
pub mod users;

use casa_core::{Casa, DeviceKind};

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, casa: &Casa, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => users::login(casa, args, settings).await,
        Command::Register(args) => users::register(casa, args, settings).await,
        Command::Users(args) => users::handle(casa, args, settings).await,
        Command::Lights(args) => devices::handle_lights(casa, args, settings).await,
        Command::Doors(args) => devices::handle_doors(casa, args, settings).await,
        Command::Overview => overview::handle(casa, settings).await,
        Command::Ping => connection::ping(casa, settings).await,
        Command::Diagnose => connection::diagnose(casa, settings).await,
        // Endpoints, Config, and Completions are handled before a client exists
        Command::Endpoints | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Operation label used in error messages, e.g. `"list lights"`.
fn op(verb: &str, kind: DeviceKind) -> String {
    format!("{verb} {}", kind.plural())
}
