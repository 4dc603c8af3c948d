//! Response definitions
//!
//! Represents responses to clients.

use serde::{Deserialize, Serialize};

use crate::handler::messages;

/// A response to send to the client
///
/// Mirrors the wire schema directly: the command echoed back (or
/// `"unknown"`), a success flag, a human-readable outcome message, and the
/// description carried only by a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Echoed command name, or "unknown"
    pub command: String,

    /// Whether the operation succeeded
    pub result: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Description payload, present only on a successful search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub des: Option<String>,
}

impl Response {
    /// Create a success response
    pub fn ok(command: &str, message: impl Into<String>) -> Self {
        Self {
            command: command.to_string(),
            result: true,
            message: message.into(),
            des: None,
        }
    }

    /// Create a failure response
    pub fn fail(command: &str, message: impl Into<String>) -> Self {
        Self {
            command: command.to_string(),
            result: false,
            message: message.into(),
            des: None,
        }
    }

    /// Create a successful search response carrying the description
    pub fn search_hit(word: &str, des: impl Into<String>) -> Self {
        let des = des.into();
        Self {
            command: "search".to_string(),
            result: true,
            message: format!("{} : {}", word, des),
            des: Some(des),
        }
    }

    /// The generic answer to an undecodable or unrecognized request
    pub fn invalid() -> Self {
        Self::fail("unknown", messages::INVALID_REQUEST)
    }
}
