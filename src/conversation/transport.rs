//! HTTP transport for the conversation client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::chat::{ChatReply, ChatRequest, ChatStatus, ErrorBody};
use crate::error::ErrorCode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(150);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {error}")]
    Server { status: u16, error: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// The localized error the server put in its body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { error, .. } if !error.trim().is_empty() => Some(error.as_str()),
            _ => None,
        }
    }
}

impl ErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "E_TRANSPORT_HTTP",
            Self::Server { status, .. } if *status < 500 => "E_TRANSPORT_REJECTED",
            Self::Server { .. } => "E_TRANSPORT_SERVER",
            Self::Decode(_) => "E_TRANSPORT_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

/// Delivers one chat message and returns the assistant's text.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str, intent: Option<&str>) -> Result<String, TransportError>;
}

/// `ChatTransport` over the service's `/api/chat` endpoint.
pub struct HttpChatTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// `GET /api/chat`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or answers non-200.
    pub async fn ping(&self) -> Result<ChatStatus, TransportError> {
        let response = self.http.get(self.chat_url()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(server_error(status, &body));
        }
        decode(&body)
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, message: &str, intent: Option<&str>) -> Result<String, TransportError> {
        let request = ChatRequest { message: message.to_string(), intent: intent.map(str::to_string) };
        let response = self.http.post(self.chat_url()).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "transport: chat response");

        if status != StatusCode::OK {
            return Err(server_error(status, &body));
        }
        let reply: ChatReply = decode(&body)?;
        Ok(reply.message)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Non-200 responses carry `{ error, details? }`; anything else is a decode
/// failure so the caller falls back to its own message.
fn server_error(status: StatusCode, body: &str) -> TransportError {
    match decode::<ErrorBody>(body) {
        Ok(parsed) => TransportError::Server { status: status.as_u16(), error: parsed.error },
        Err(_) => TransportError::Decode(format!("status {}: non-JSON error body", status.as_u16())),
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
