use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, DNS, or connection failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with something other than the expected status.
    /// Displays the backend's `detail` message when it sent one.
    #[error("{}", status_message(.status, .detail))]
    UnexpectedStatus {
        status: u16,
        detail: Option<String>,
        body: String,
    },

    /// The payload did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("unexpected status {status}"),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Error payload returned by the backend. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Decode leniently: anything that is not a JSON object yields no detail.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Human-readable detail; non-string details are rendered as JSON.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
