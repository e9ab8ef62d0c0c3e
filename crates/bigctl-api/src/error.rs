use thiserror::Error;

/// Top-level error type for the `bigctl-api` crate.
///
/// Non-2xx HTTP statuses are NOT errors for the per-object operations:
/// those hand the raw response back and the caller classifies it. Only
/// configuration, transport, and decoding failures land here.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// One or both credential environment variables are unset.
    #[error("BigIP credentials not configured: set {missing}")]
    MissingCredentials { missing: String },

    /// URL parsing error (bad host, protocol, or path prefix).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success status on a call whose body we need to interpret.
    #[error("BigIP API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON decoding failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for errors raised before any request was sent.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. } | Self::InvalidUrl(_))
    }

    /// Returns `true` if the appliance could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Returns `true` if a configured request timeout expired. The request
    /// may still have been applied on the appliance.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
