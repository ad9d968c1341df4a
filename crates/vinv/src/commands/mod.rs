//! Command dispatch.

pub mod certificate;
pub mod config_cmd;
pub mod inventory;
mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Run a data command. Each handler validates its criteria before the
/// config file, keyring or data source is touched.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Inventory(args) => inventory::handle(args, global).await,
        Command::Certificate(args) => certificate::handle(args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need a data source".into(),
        )),
    }
}
