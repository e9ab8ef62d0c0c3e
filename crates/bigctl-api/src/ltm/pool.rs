// Pool and pool-member endpoints
//
// Members live under `/pool/~partition~pool/members`. Reads address a
// member with a second `~partition~name` segment; removal addresses it as
// bare `name:port`. Both forms are what the rollback tooling has always
// sent, so they are kept exactly.

use reqwest::Response;
use serde_json::json;
use tracing::debug;

use crate::client::BigIpClient;
use crate::error::Error;
use crate::models::{ObjectId, ObjectType, PoolMember};

impl BigIpClient {
    /// `GET /pool`
    pub async fn list_pools(&self) -> Result<Response, Error> {
        self.list(ObjectType::Pool).await
    }

    /// `GET /pool/~{partition}~{pool}/stats`
    pub async fn get_pool_stats(&self, partition: &str, pool_name: &str) -> Result<Response, Error> {
        self.get_stats(partition, pool_name, ObjectType::Pool).await
    }

    /// `GET /pool/~{partition}~{pool}/members`
    pub async fn get_pool_members(
        &self,
        partition: &str,
        pool_name: &str,
    ) -> Result<Response, Error> {
        let url = self.object_url(
            ObjectType::Pool,
            ObjectId::new(partition, pool_name),
            Some("members"),
        )?;
        self.get(url).await
    }

    /// `GET /pool/~{partition}~{pool}/members/~{partition}~{member}/stats`
    ///
    /// `member_name` is the full member name, usually `address:port`.
    pub async fn get_pool_member_stats(
        &self,
        partition: &str,
        pool_name: &str,
        member_name: &str,
    ) -> Result<Response, Error> {
        let pool = ObjectId::new(partition, pool_name);
        let member = ObjectId::new(partition, member_name);
        let url = self.url(&format!("{}/{pool}/members/{member}/stats", ObjectType::Pool))?;
        self.get(url).await
    }

    /// Add `member_name:member_port` to a pool.
    ///
    /// `POST /pool/~{partition}~{pool}/members/` with `{"name": "/{partition}/{member}:{port}"}`
    pub async fn add_pool_member(
        &self,
        partition: &str,
        pool_name: &str,
        member_name: &str,
        member_port: &str,
    ) -> Result<Response, Error> {
        let pool = ObjectId::new(partition, pool_name);
        let member = PoolMember::new(member_name, member_port);
        let url = self.url(&format!("{}/{pool}/members/", ObjectType::Pool))?;
        debug!(%pool, %member, "adding pool member");
        self.post(url, &json!({ "name": member.qualified(partition) }))
            .await
    }

    /// Remove `member_name:member_port` from a pool.
    ///
    /// `DELETE /pool/~{partition}~{pool}/members/{member}:{port}`. The
    /// member segment carries no `~partition~` prefix.
    pub async fn remove_pool_member(
        &self,
        partition: &str,
        pool_name: &str,
        member_name: &str,
        member_port: &str,
    ) -> Result<Response, Error> {
        let pool = ObjectId::new(partition, pool_name);
        let member = PoolMember::new(member_name, member_port);
        let url = self.url(&format!("{}/{pool}/members/{member}", ObjectType::Pool))?;
        debug!(%pool, %member, "removing pool member");
        self.delete(url).await
    }
}
