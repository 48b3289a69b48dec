//! # Outcomes
//!
//! What an action can end up as: a payload on success, or one of three failure
//! kinds. None of the failures are retried; the user re-triggers.

use std::fmt;

use serde_json::Value;

/// Lifecycle of a single controller.
///
/// ```text
/// Idle → InFlight → Succeeded ─┐
///                 → Failed ────┴→ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// A successfully parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Binary(b) => Some(b),
            Payload::Json(_) => None,
        }
    }
}

/// Discriminant of [`ActionError`], handed to presentation hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkError,
    HttpError(u16),
    PayloadError,
}

/// Errors that end an action in the `Failed` state.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The request could not be sent or the response could not be read.
    Network(String),
    /// The server answered with a non-2xx status. `body` is the reply
    /// parsed as JSON, when it was JSON.
    Http {
        status: u16,
        message: String,
        body: Option<Value>,
    },
    /// The body did not parse as the expected format.
    Payload(String),
}

impl ActionError {
    /// The JSON error body of a non-2xx reply, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ActionError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ActionError::Network(_) => FailureKind::NetworkError,
            ActionError::Http { status, .. } => FailureKind::HttpError(*status),
            ActionError::Payload(_) => FailureKind::PayloadError,
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Network(msg) => write!(f, "network error: {msg}"),
            ActionError::Http { status, message, .. } if message.is_empty() => {
                write!(f, "server error (HTTP {status})")
            }
            ActionError::Http { status, message, .. } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ActionError::Payload(msg) => write!(f, "unreadable response: {msg}"),
        }
    }
}

impl std::error::Error for ActionError {}

pub type ActionResult = Result<Payload, ActionError>;
