//! LLM types: the generation result, errors and the `TextGeneration` seam.

use crate::error::ErrorCode;

/// Marker included in the text of quota errors. Callers classify failures
/// by searching error text, so the marker must survive `Display`.
pub const QUOTA_EXCEEDED_MARKER: &str = "QUOTA_EXCEEDED";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The provider refused to generate. `reason` is the provider's own
    /// code, e.g. `SAFETY`.
    #[error("response was blocked due to {reason}")]
    Blocked { reason: String },

    /// The provider rejected the call for quota or rate reasons.
    #[error("QUOTA_EXCEEDED: {0}")]
    QuotaExceeded(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Blocked { .. } => "E_BLOCKED",
            Self::QuotaExceeded(_) => "E_QUOTA_EXCEEDED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiRequest(_) | Self::QuotaExceeded(_) | Self::ApiResponse { status: 500..=599, .. }
        )
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Result of a single generation call.
///
/// `text` is `None` when the provider answered successfully but produced no
/// usable text (no candidates, no text parts, or whitespace only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl Generation {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), finish_reason: Some("STOP".into()) }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Generated text with surrounding whitespace removed, or `None` when
    /// nothing usable came back.
    #[must_use]
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// =============================================================================
// TEXT GENERATION TRAIT
// =============================================================================

/// Provider-neutral async trait for single-prompt text generation.
/// Enables mocking in tests.
#[async_trait::async_trait]
pub trait TextGeneration: Send + Sync {
    /// Send one prompt and wait for the full completion.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider blocks the
    /// prompt, quota is exhausted, or the response is malformed.
    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
