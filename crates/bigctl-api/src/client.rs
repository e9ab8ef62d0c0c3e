// BigIP management API HTTP client
//
// Wraps `reqwest::Client` with basic auth and iControl REST URL
// construction. Endpoint groups (virtual servers, pools, nodes) are
// implemented as inherent methods in `ltm/` to keep this module focused
// on transport mechanics.
//
// Every request helper returns the raw `reqwest::Response`. Status codes
// are never interpreted here; the caller decides what a 404 or 409 means.

use reqwest::Response;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Scheme used when none is given.
pub const DEFAULT_PROTOCOL: &str = "https";

/// iControl REST prefix of the Local Traffic Manager module.
pub const DEFAULT_MGMT_API_PATH: &str = "mgmt/tm/ltm";

// ── Endpoint ────────────────────────────────────────────────────────

/// Where the management API lives: `{protocol}://{host}/{mgmt_api_path}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub protocol: String,
    pub mgmt_api_path: String,
}

impl Endpoint {
    /// Endpoint on `host` with the default protocol and LTM path prefix.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            protocol: DEFAULT_PROTOCOL.into(),
            mgmt_api_path: DEFAULT_MGMT_API_PATH.into(),
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_mgmt_api_path(mut self, path: impl Into<String>) -> Self {
        self.mgmt_api_path = path.into();
        self
    }

    /// Base URL string without a trailing slash.
    pub fn base(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let prefix = self.mgmt_api_path.trim_matches('/');
        if prefix.is_empty() {
            format!("{}://{host}", self.protocol)
        } else {
            format!("{}://{host}/{prefix}", self.protocol)
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Client for the BigIP LTM management API.
///
/// One request per operation, basic auth on each, no retries and no
/// state carried between calls.
pub struct BigIpClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    credentials: Credentials,
}

impl BigIpClient {
    /// Build a client from explicit parts.
    pub fn new(
        endpoint: Endpoint,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, endpoint, credentials))
    }

    /// Build a client for `host` with credentials from `BIGIP_USER` / `BIGIP_PASS`.
    ///
    /// Credentials are checked before anything else, so a missing variable
    /// fails here without touching the network.
    pub fn from_env(host: impl Into<String>) -> Result<Self, Error> {
        let credentials = Credentials::from_env()?;
        Self::new(
            Endpoint::new(host),
            credentials,
            &TransportConfig::default(),
        )
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Endpoint, credentials: Credentials) -> Self {
        Self {
            http,
            endpoint,
            credentials,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a path (e.g. `"pool/~Common~web/members"`) onto the API base.
    ///
    /// The path is appended verbatim, trailing slash included; BigIP is
    /// picky about some collection URLs.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/{}", self.endpoint.base(), path.trim_start_matches('/'));
        Ok(Url::parse(&full)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get(&self, url: Url) -> Result<Response, Error> {
        debug!("GET {url}");
        let builder = self.credentials.apply(self.http.get(url));
        Ok(builder.send().await?)
    }

    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Response, Error> {
        debug!("POST {url}");
        let builder = self.credentials.apply(self.http.post(url).json(body));
        Ok(builder.send().await?)
    }

    pub(crate) async fn patch<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Response, Error> {
        debug!("PATCH {url}");
        let builder = self.credentials.apply(self.http.patch(url).json(body));
        Ok(builder.send().await?)
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<Response, Error> {
        debug!("DELETE {url}");
        let builder = self.credentials.apply(self.http.delete(url));
        Ok(builder.send().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(endpoint: Endpoint) -> BigIpClient {
        BigIpClient::with_client(
            reqwest::Client::new(),
            endpoint,
            Credentials::new("admin", "pw".to_owned().into()),
        )
    }

    #[test]
    fn endpoint_defaults() {
        let endpoint = Endpoint::new("rt-bigip-01");
        assert_eq!(endpoint.base(), "https://rt-bigip-01/mgmt/tm/ltm");
    }

    #[test]
    fn endpoint_overrides_trim_slashes() {
        let endpoint = Endpoint::new("10.0.0.5:8443/")
            .with_protocol("http")
            .with_mgmt_api_path("/mgmt/tm/gtm/");
        assert_eq!(endpoint.base(), "http://10.0.0.5:8443/mgmt/tm/gtm");
    }

    #[test]
    fn url_keeps_tilde_and_trailing_slash() {
        let c = client(Endpoint::new("bigip.local"));
        let url = c.url("pool/~producao~web/members/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://bigip.local/mgmt/tm/ltm/pool/~producao~web/members/"
        );
    }

    #[test]
    fn url_keeps_member_colon() {
        let c = client(Endpoint::new("bigip.local"));
        let url = c.url("pool/~producao~web/members/10.0.0.1:8080").unwrap();
        assert_eq!(url.path(), "/mgmt/tm/ltm/pool/~producao~web/members/10.0.0.1:8080");
    }

    #[test]
    fn bad_host_is_invalid_url() {
        let c = client(Endpoint::new("bad host name"));
        assert!(matches!(c.url("virtual"), Err(Error::InvalidUrl(_))));
    }
}
