//! Invocation responses.
//!
//! [`Executor::invoke`](crate::Executor::invoke) never returns a Rust error:
//! every outcome is a [`Response`] carrying a status code, a payload on
//! success and a message on failure.

use serde::{Deserialize, Serialize};

use crate::{Error, Output};

/// Outcome class of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    /// Success (200)
    Ok,
    /// Failure (500)
    Error,
}

impl ResponseStatus {
    /// Numeric status code
    pub const fn code(&self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Error => 500,
        }
    }
}

/// Result of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Outcome class
    pub status: ResponseStatus,
    /// JSON payload, empty on failure
    pub payload: Vec<u8>,
    /// Error message, empty on success
    pub message: String,
}

impl Response {
    /// Success response with a payload
    pub fn success(payload: Vec<u8>) -> Self {
        Response {
            status: ResponseStatus::Ok,
            payload,
            message: String::new(),
        }
    }

    /// Failure response with a message
    pub fn error(message: impl Into<String>) -> Self {
        Response {
            status: ResponseStatus::Error,
            payload: Vec::new(),
            message: message.into(),
        }
    }

    /// Whether the invocation succeeded
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }

    /// Parse the payload as JSON
    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
    }
}

impl From<crate::Result<Output>> for Response {
    fn from(result: crate::Result<Output>) -> Self {
        match result.and_then(|output| output.to_payload()) {
            Ok(payload) => Response::success(payload),
            Err(err) => Response::from(err),
        }
    }
}

impl From<Error> for Response {
    fn from(err: Error) -> Self {
        Response::error(err.to_string())
    }
}
