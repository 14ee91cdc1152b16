//! Chat message model and `/api/chat` wire types.
//!
//! Shared by the HTTP service and the conversation client so both sides
//! agree on one JSON shape.

pub mod prompts;
pub mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// MESSAGE
// =============================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
}

/// Delivery state of a message. Absent until the exchange settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Delivered,
    Pending,
    Failed,
}

/// One entry in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// `POST /api/chat` request body.
///
/// `intent` is an opaque quick-reply code. When present and recognised it
/// wins over matching on `message` text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

/// `200` body of `POST /api/chat`. Exactly one of `success` or `fallback`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl ChatReply {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), success: Some(true), fallback: None }
    }

    #[must_use]
    pub fn fallback(message: impl Into<String>) -> Self {
        Self { message: message.into(), success: None, fallback: Some(true) }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback == Some(true)
    }
}

/// `4xx`/`5xx` body of `POST /api/chat`. `details` carries the raw error
/// text for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// `GET /api/chat` liveness body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStatus {
    pub status: String,
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
