// Virtual server endpoints
//
// These operations are generic over the collection (`virtual` by default)
// because BigIP addresses every LTM object the same way:
// `/{type}/~partition~name[/sub-resource]`.

use reqwest::Response;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::BigIpClient;
use crate::error::Error;
use crate::models::{ObjectId, ObjectType, VirtualServerSummary, response_message};

impl BigIpClient {
    /// List every object of a type.
    ///
    /// `GET /{type}`
    pub async fn list(&self, object_type: ObjectType) -> Result<Response, Error> {
        let url = self.url(object_type.as_ref())?;
        self.get(url).await
    }

    /// Fetch a single object.
    ///
    /// `GET /{type}/~{partition}~{name}`
    pub async fn get_object(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url = self.object_url(object_type, ObjectId::new(partition, name), None)?;
        self.get(url).await
    }

    /// `GET /{type}/~{partition}~{name}/stats`
    pub async fn get_stats(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url = self.object_url(object_type, ObjectId::new(partition, name), Some("stats"))?;
        self.get(url).await
    }

    /// `GET /{type}/~{partition}~{name}/profiles`
    pub async fn get_persistence_profiles(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url =
            self.object_url(object_type, ObjectId::new(partition, name), Some("profiles"))?;
        self.get(url).await
    }

    /// `PATCH /{type}/~{partition}~{name}` with `{"enabled": true}`
    pub async fn enable(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url = self.object_url(object_type, ObjectId::new(partition, name), None)?;
        debug!(partition, name, "enabling {object_type}");
        self.patch(url, &json!({ "enabled": true })).await
    }

    /// `PATCH /{type}/~{partition}~{name}` with `{"disabled": true}`
    ///
    /// Only the requested flag is sent; the appliance clears the other one.
    pub async fn disable(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url = self.object_url(object_type, ObjectId::new(partition, name), None)?;
        debug!(partition, name, "disabling {object_type}");
        self.patch(url, &json!({ "disabled": true })).await
    }

    /// `DELETE /{type}/~{partition}~{name}`
    pub async fn delete_object(
        &self,
        partition: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<Response, Error> {
        let url = self.object_url(object_type, ObjectId::new(partition, name), None)?;
        debug!(partition, name, "deleting {object_type}");
        self.delete(url).await
    }

    /// List virtual servers and map each into a [`VirtualServerSummary`].
    ///
    /// Unlike the raw operations, this one reads the body, so a non-2xx
    /// status becomes [`Error::Api`].
    pub async fn list_virtual_server_summaries(
        &self,
    ) -> Result<Vec<VirtualServerSummary>, Error> {
        let resp = self.list(ObjectType::Virtual).await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: response_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        let collection: Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        collection
            .get("items")
            .and_then(Value::as_array)
            .map_or_else(
                || Ok(Vec::new()),
                |items| items.iter().map(VirtualServerSummary::from_json).collect(),
            )
    }

    /// `{type}/~{partition}~{name}[/{sub}]`
    pub(crate) fn object_url(
        &self,
        object_type: ObjectType,
        id: ObjectId<'_>,
        sub_resource: Option<&str>,
    ) -> Result<url::Url, Error> {
        match sub_resource {
            Some(sub) => self.url(&format!("{object_type}/{id}/{sub}")),
            None => self.url(&format!("{object_type}/{id}")),
        }
    }
}
