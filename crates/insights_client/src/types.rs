use std::fmt;

use serde_json::Value;

pub type OpId = u64;

/// Completion surfaced by the client bridge, tagged with the operation
/// id the request was issued under.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    FetchCompleted {
        op: OpId,
        result: Result<Value, InsightsError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct InsightsError {
    pub kind: FailureKind,
    pub message: String,
}

impl InsightsError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status code, when the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            FailureKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The configured base endpoint is not a usable URL.
    InvalidUrl,
    /// The service answered with a non-success status.
    HttpStatus(u16),
    Timeout,
    Network,
    /// A success status whose body is not valid JSON.
    Payload,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Payload => write!(f, "malformed payload"),
        }
    }
}
