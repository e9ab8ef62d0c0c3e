//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod migrate;
pub mod nodes;
pub mod pools;
pub mod util;
pub mod virtuals;

use bigctl_api::BigIpClient;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch an appliance-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &BigIpClient,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let partition = session.appliance.partition.as_str();
    match cmd {
        Command::Migrate(args) => migrate::handle(client, session, args, global).await,
        Command::Virtual(args) => virtuals::handle(client, partition, args, global).await,
        Command::Pool(args) => pools::handle(client, partition, args, global).await,
        Command::Node(args) => nodes::handle(client, partition, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
