// ── Runtime connection configuration ──
//
// Describes how to reach one appliance. Carries credentials and
// transport tuning but never touches disk: the binary resolves files,
// env, and flags, then hands a finished `ApplianceConfig` in.

use std::time::Duration;

use bigctl_api::{BigIpClient, Credentials, Endpoint, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Everything needed to talk to one BigIP.
#[derive(Debug, Clone)]
pub struct ApplianceConfig {
    /// Host, protocol, and management API prefix.
    pub endpoint: Endpoint,
    /// Basic-auth credentials (from `BIGIP_USER` / `BIGIP_PASS`).
    pub credentials: Credentials,
    /// Partition the migration operates in.
    pub partition: String,
    /// Certificate verification strategy.
    pub tls: TlsMode,
    /// Per-request timeout. `None` waits as long as the appliance takes.
    pub timeout: Option<Duration>,
}

impl ApplianceConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }

    /// Build the HTTP client. No request is sent.
    pub fn connect(&self) -> Result<BigIpClient, CoreError> {
        Ok(BigIpClient::new(
            self.endpoint.clone(),
            self.credentials.clone(),
            &self.transport(),
        )?)
    }
}
