// bigctl-api: Async Rust client for the F5 BigIP iControl REST API (LTM module)

pub mod auth;
pub mod client;
pub mod error;
pub mod ltm;
pub mod models;
pub mod transport;

pub use auth::Credentials;
pub use client::{BigIpClient, DEFAULT_MGMT_API_PATH, DEFAULT_PROTOCOL, Endpoint};
pub use error::Error;
pub use models::{
    ObjectId, ObjectType, PoolMember, VirtualServerStatus, VirtualServerSummary, response_message,
};
pub use transport::{TlsMode, TransportConfig};

/// Re-exported so callers can inspect raw responses without a direct dependency.
pub use reqwest::{Response, StatusCode};
