//! `/api/chat`: assistant exchange and liveness probe.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::chat::{ChatRequest, ChatStatus, ErrorBody, text};
use crate::error::ErrorCode;
use crate::services::chat::{self, ChatError, classify_failure};
use crate::state::AppState;

/// `POST /api/chat`: answer one message.
///
/// A body that is not valid JSON is treated like any other failure (500),
/// while a missing or blank `message` is a 400.
pub async fn post_chat(State(state): State<AppState>, body: Result<Json<ChatRequest>, JsonRejection>) -> Response {
    let result = match body {
        Ok(Json(req)) => chat::handle_message(state.llm(), &req.message, req.intent.as_deref()).await,
        Err(rejection) => Err(ChatError::InvalidBody(rejection.body_text())),
    };

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome.into_reply())).into_response(),
        Err(err) => chat_error_response(&err),
    }
}

/// `GET /api/chat`: liveness probe.
pub async fn chat_status() -> Json<ChatStatus> {
    Json(ChatStatus { status: text::CHAT_API_RUNNING.into() })
}

pub(crate) fn chat_error_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
        ChatError::LlmNotConfigured | ChatError::InvalidBody(_) | ChatError::Llm(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn chat_error_response(err: &ChatError) -> Response {
    let status = chat_error_status(err);
    let body = match err {
        ChatError::EmptyMessage => ErrorBody { error: text::EMPTY_MESSAGE.into(), details: None },
        other => {
            let details = other.to_string();
            warn!(error = %details, code = other.error_code(), retryable = other.retryable(), "chat: request failed");
            ErrorBody { error: classify_failure(&details).message().into(), details: Some(details) }
        }
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
