//! Node command handlers.

use bigctl_api::BigIpClient;

use crate::cli::{GlobalOpts, NodeArgs, NodeCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &BigIpClient,
    partition: &str,
    args: NodeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NodeCommand::Create { name, address } => {
            let resp = client.create_node(partition, &name, &address).await?;
            util::show_response(resp, global).await
        }
    }
}
