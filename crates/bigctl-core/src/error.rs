// ── Core error types ──
//
// Per-member HTTP failures are not errors at this level: they are
// reported and the migration moves on. CoreError covers what stops a
// run outright.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach BigIP at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The appliance accepted the connection but did not answer in time.
    /// The change may or may not have been applied.
    #[error("No answer from BigIP at {url} before the request timeout; verify the member state")]
    TimedOut { url: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Confirmation prompt failed: {message}")]
    Prompt { message: String },

    #[error(transparent)]
    Api(bigctl_api::Error),
}

impl From<bigctl_api::Error> for CoreError {
    fn from(err: bigctl_api::Error) -> Self {
        match err {
            bigctl_api::Error::MissingCredentials { .. } | bigctl_api::Error::InvalidUrl(_) => {
                Self::Config {
                    message: err.to_string(),
                }
            }
            bigctl_api::Error::Transport(e) if e.is_connect() => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            bigctl_api::Error::Transport(e) if e.is_timeout() => Self::TimedOut {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            },
            other => Self::Api(other),
        }
    }
}
