//! Chat service: user text → (quick-reply expansion) → model → reply.
//!
//! DESIGN
//! ======
//! One upstream call per message, no retries. An empty completion falls
//! back to a canned report keyed by what the user originally sent, not by
//! the expanded prompt. Failures are classified by error text so upstream
//! wording (`SAFETY`, `QUOTA_EXCEEDED`) picks the localized notice.

use tracing::{info, warn};

use crate::chat::prompts::{self, QuickReply};
use crate::chat::{ChatReply, text};
use crate::error::ErrorCode;
use crate::llm::TextGeneration;
use crate::llm::types::{LlmError, QUOTA_EXCEEDED_MARKER};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("LLM not configured: set GEMINI_API_KEY")]
    LlmNotConfigured,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::InvalidBody(_) => "E_INVALID_BODY",
            Self::Llm(_) => "E_LLM_ERROR",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable())
    }
}

/// Which localized notice a failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Safety,
    Quota,
    Other,
}

impl FailureKind {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Safety => text::SAFETY_BLOCKED,
            Self::Quota => text::QUOTA_EXCEEDED,
            Self::Other => text::GENERIC_FAILURE,
        }
    }
}

/// Classify a failure by searching its text. `SAFETY` wins over
/// `QUOTA_EXCEEDED` when both appear.
#[must_use]
pub fn classify_failure(error_text: &str) -> FailureKind {
    if error_text.contains("SAFETY") {
        FailureKind::Safety
    } else if error_text.contains(QUOTA_EXCEEDED_MARKER) {
        FailureKind::Quota
    } else {
        FailureKind::Other
    }
}

/// Successful outcome of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Text generated by the model.
    Reply(String),
    /// Canned report or apology used because the model returned no text.
    Fallback(String),
}

impl ChatOutcome {
    #[must_use]
    pub fn into_reply(self) -> ChatReply {
        match self {
            Self::Reply(message) => ChatReply::success(message),
            Self::Fallback(message) => ChatReply::fallback(message),
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one chat exchange.
///
/// # Errors
///
/// - [`ChatError::EmptyMessage`] when `message` is blank; the model is not called.
/// - [`ChatError::LlmNotConfigured`] when no client is available.
/// - [`ChatError::Llm`] for any upstream failure.
pub async fn handle_message(
    llm: Option<&dyn TextGeneration>,
    message: &str,
    intent: Option<&str>,
) -> Result<ChatOutcome, ChatError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let quick_reply = prompts::resolve(trimmed, intent);
    // A recognised intent wins; plain text goes through phrase expansion.
    let prompt = quick_reply.map_or_else(|| prompts::expand(trimmed), |q| q.prompt());
    info!(
        message_len = trimmed.len(),
        quick_reply = quick_reply.map(QuickReply::code),
        "chat: message received"
    );

    let Some(llm) = llm else {
        return Err(ChatError::LlmNotConfigured);
    };

    let generation = llm.generate(prompt).await.inspect_err(|e| {
        warn!(error = %e, code = e.error_code(), "chat: upstream call failed");
    })?;

    if let Some(reply) = generation.usable_text() {
        info!(reply_len = reply.len(), "chat: reply generated");
        return Ok(ChatOutcome::Reply(reply.to_string()));
    }

    let fallback = quick_reply
        .and_then(QuickReply::fallback_report)
        .unwrap_or(text::EMPTY_REPLY_APOLOGY);
    warn!(
        finish_reason = generation.finish_reason.as_deref(),
        canned = quick_reply.is_some_and(|q| q.fallback_report().is_some()),
        "chat: empty completion, using fallback"
    );
    Ok(ChatOutcome::Fallback(fallback.to_string()))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
