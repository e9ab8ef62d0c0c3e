//! Pool command handlers.

use bigctl_api::BigIpClient;

use crate::cli::{GlobalOpts, PoolArgs, PoolCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &BigIpClient,
    partition: &str,
    args: PoolArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resp = match args.command {
        PoolCommand::List => client.list_pools().await?,

        PoolCommand::Stats { pool } => client.get_pool_stats(partition, &pool).await?,

        PoolCommand::Members { pool } => client.get_pool_members(partition, &pool).await?,

        PoolCommand::MemberStats { pool, member } => {
            client
                .get_pool_member_stats(partition, &pool, &member)
                .await?
        }

        PoolCommand::AddMember { pool, member, port } => {
            client
                .add_pool_member(partition, &pool, &member, &port)
                .await?
        }

        PoolCommand::RemoveMember { pool, member, port } => {
            if !util::confirm(
                &format!("Remove {member}:{port} from {partition}/{pool}?"),
                global.yes,
            )? {
                return Ok(());
            }
            client
                .remove_pool_member(partition, &pool, &member, &port)
                .await?
        }
    };

    util::show_response(resp, global).await
}
