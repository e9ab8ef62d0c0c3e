//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use bigctl_config::ConfigError;
use bigctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to BigIP at {url}")]
    #[diagnostic(
        code(bigctl::connection_failed),
        help(
            "Check that the management interface is reachable.\n\
             Reason: {reason}\n\
             Try --protocol http for a plain-HTTP lab box."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("No answer from BigIP at {url} within the request timeout")]
    #[diagnostic(
        code(bigctl::timed_out),
        help(
            "The appliance may still have applied the change; check it before retrying.\n\
             Raise --timeout or drop `timeout` from the profile to wait indefinitely."
        )
    )]
    TimedOut { url: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(bigctl::tls_error),
        help(
            "The appliance is probably using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or set ca_cert in your profile."
        )
    )]
    Tls { message: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(bigctl::no_credentials),
        help("Export BIGIP_USER and BIGIP_PASS with an account allowed to edit LTM pools.")
    )]
    NoCredentials { message: String },

    // ── Appliance responses ──────────────────────────────────────────
    #[error("BigIP returned {status}: {message}")]
    #[diagnostic(code(bigctl::request_failed))]
    Request { status: u16, message: String },

    #[error("{failed} of {total} members failed")]
    #[diagnostic(
        code(bigctl::migration_incomplete),
        help("The lines marked in red above show which members need attention.")
    )]
    MigrationIncomplete { failed: usize, total: usize },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(bigctl::decode))]
    Decode { message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bigctl::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(bigctl::config),
        help("Check the file shown by: bigctl config path")
    )]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(bigctl::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TimedOut { .. } | Self::Tls { .. } => {
                exit_code::CONNECTION
            }
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Request { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                409 => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. } | Self::Prompt { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<bigctl_api::Error> for CliError {
    fn from(err: bigctl_api::Error) -> Self {
        match err {
            bigctl_api::Error::MissingCredentials { .. } => Self::NoCredentials {
                message: err.to_string(),
            },
            bigctl_api::Error::Tls(message) => Self::Tls { message },
            bigctl_api::Error::Api { status, message } => Self::Request { status, message },
            bigctl_api::Error::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            bigctl_api::Error::Transport(e) if e.is_timeout() && !e.is_connect() => {
                Self::TimedOut {
                    url: e.url().map(ToString::to_string).unwrap_or_default(),
                }
            }
            bigctl_api::Error::Transport(e) => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            bigctl_api::Error::Deserialization { message, .. } => Self::Decode { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::TimedOut { url } => Self::TimedOut { url },
            CoreError::Config { message } => Self::Validation {
                field: "configuration".into(),
                reason: message,
            },
            CoreError::Prompt { message } => Self::Prompt { message },
            CoreError::Api(e) => e.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Credentials(e) => e.into(),
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other @ ConfigError::Figment(_) => Self::Config(Box::new(other)),
        }
    }
}
