// ── Response classification ──
//
// Buckets a raw BigIP response for display. Nothing here feeds back into
// control flow: the migration always moves on to the next member.

use std::fmt;

use bigctl_api::{Response, StatusCode, response_message};

use crate::error::CoreError;

/// Longest raw body excerpt shown when an error body carries no `message`.
const BODY_PREVIEW_CHARS: usize = 200;

/// Display bucket for one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 200-399, whatever the body says.
    Success { status: u16 },
    /// 409 whose message says the object already exists. Benign on re-runs.
    Conflict { status: u16, message: String },
    /// Any other status >= 400.
    Failed { status: u16, message: String },
    /// Below 200; nothing useful to say.
    Informational { status: u16 },
}

impl Outcome {
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status }
            | Self::Conflict { status, .. }
            | Self::Failed { status, .. }
            | Self::Informational { status } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status } => write!(f, "Returned code {status}: Success"),
            Self::Conflict { status, message } | Self::Failed { status, message } => {
                write!(f, "Returned code {status}: {message}")
            }
            Self::Informational { status } => write!(f, "Returned code {status}:"),
        }
    }
}

/// Classify a status code and response body.
pub fn classify(status: u16, body: &str) -> Outcome {
    match status {
        200..=399 => Outcome::Success { status },
        400.. => {
            let message = error_message(status, body);
            if status == 409 && message.contains("already exists") {
                Outcome::Conflict { status, message }
            } else {
                Outcome::Failed { status, message }
            }
        }
        _ => Outcome::Informational { status },
    }
}

/// Read a response body and classify it.
pub async fn classify_response(resp: Response) -> Result<Outcome, CoreError> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(bigctl_api::Error::from)?;
    Ok(classify(status, &body))
}

/// The appliance's `message`, else a body preview, else the reason phrase.
fn error_message(status: u16, body: &str) -> String {
    if let Some(message) = response_message(body) {
        return message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(BODY_PREVIEW_CHARS).collect();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown error")
        .to_owned()
}
