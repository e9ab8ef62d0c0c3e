use reqwest::Response;
use serde_json::json;
use tracing::debug;

use crate::client::BigIpClient;
use crate::error::Error;
use crate::models::ObjectType;

impl BigIpClient {
    /// Register a backend address as a node.
    ///
    /// `POST /node/` with `{"name", "partition", "address"}`
    pub async fn create_node(
        &self,
        partition: &str,
        node_name: &str,
        ip_address: &str,
    ) -> Result<Response, Error> {
        let url = self.url(&format!("{}/", ObjectType::Node))?;
        debug!(partition, node_name, ip_address, "creating node");
        self.post(
            url,
            &json!({
                "name": node_name,
                "partition": partition,
                "address": ip_address,
            }),
        )
        .await
    }
}
