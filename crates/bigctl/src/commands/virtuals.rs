//! Virtual server command handlers.
//!
//! Everything except `list` also accepts `--type pool|node`, since the
//! appliance addresses every LTM object the same way.

use tabled::Tabled;

use bigctl_api::{BigIpClient, ObjectType, VirtualServerSummary};

use crate::cli::{GlobalOpts, ObjectKind, VirtualArgs, VirtualCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VirtualRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Partition")]
    partition: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Address")]
    address_status: String,
    #[tabled(rename = "Protocol")]
    ip_protocol: String,
    #[tabled(rename = "Pool")]
    pool: String,
}

impl From<&VirtualServerSummary> for VirtualRow {
    fn from(vs: &VirtualServerSummary) -> Self {
        Self {
            name: vs.name.clone(),
            partition: vs.partition.clone(),
            destination: vs.destination.clone(),
            status: vs.status.map(|s| s.to_string()).unwrap_or_default(),
            address_status: vs.address_status.clone(),
            ip_protocol: vs.ip_protocol.clone(),
            pool: vs.pool.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn object_type(kind: ObjectKind) -> ObjectType {
    match kind {
        ObjectKind::Virtual => ObjectType::Virtual,
        ObjectKind::Pool => ObjectType::Pool,
        ObjectKind::Node => ObjectType::Node,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &BigIpClient,
    partition: &str,
    args: VirtualArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VirtualCommand::List { raw: true } => {
            let resp = client.list(ObjectType::Virtual).await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::List { raw: false } => {
            let summaries = client.list_virtual_server_summaries().await?;
            let out = output::render_list(
                global.output,
                &summaries,
                |vs| VirtualRow::from(vs),
                |vs| vs.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VirtualCommand::Get(t) => {
            let resp = client
                .get_object(partition, &t.name, object_type(t.kind))
                .await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::Stats(t) => {
            let resp = client
                .get_stats(partition, &t.name, object_type(t.kind))
                .await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::Profiles(t) => {
            let resp = client
                .get_persistence_profiles(partition, &t.name, object_type(t.kind))
                .await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::Enable(t) => {
            let resp = client.enable(partition, &t.name, object_type(t.kind)).await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::Disable(t) => {
            let resp = client.disable(partition, &t.name, object_type(t.kind)).await?;
            util::show_response(resp, global).await
        }

        VirtualCommand::Delete(t) => {
            let kind = object_type(t.kind);
            if !util::confirm(
                &format!("Delete {kind} '{partition}/{}'? This is destructive.", t.name),
                global.yes,
            )? {
                return Ok(());
            }
            let resp = client.delete_object(partition, &t.name, kind).await?;
            util::show_response(resp, global).await
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_from_summary() {
        let vs = VirtualServerSummary::from_json(&json!({
            "name": "vs_app_443",
            "partition": "producao",
            "addressStatus": "yes",
            "destination": "/producao/10.10.0.5:443",
            "disabled": true,
            "source": "0.0.0.0/0",
            "ipProtocol": "tcp",
            "sourcePort": "preserve",
            "sourceAddressTranslation": { "type": "automap" }
        }))
        .unwrap_or_else(|e| panic!("{e}"));

        let row = VirtualRow::from(&vs);
        assert_eq!(row.destination, "10.10.0.5:443");
        assert_eq!(row.status, "disabled");
        assert_eq!(row.pool, "");
    }

    #[test]
    fn kinds_map_to_collections() {
        assert_eq!(object_type(ObjectKind::Pool).to_string(), "pool");
        assert_eq!(object_type(ObjectKind::Virtual).to_string(), "virtual");
        assert_eq!(object_type(ObjectKind::Node).to_string(), "node");
    }
}
