//! Structured failures for remote API calls.
//!
//! ERROR HANDLING
//! ==============
//! The gateway never interprets status codes beyond classifying them; pages
//! decide how to react and render `user_message` inline.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// The response body did not match the expected payload.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request body could not be serialized.
    #[error("invalid request body: {0}")]
    Encode(String),
    /// HTTP is not available in this environment (server-side render).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a status error from a raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: server_message(body) }
    }

    /// The server-provided message, when the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message to show an operator: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 responses, the only status read as "session invalid".
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Extract `message` (or `error.message`, or a string `error`) from an error body.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    let candidate = value
        .get("message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .or_else(|| value.get("error"));
    candidate
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
