//! LLM: upstream text generation for the dashboard assistant.
//!
//! DESIGN
//! ======
//! Uses environment variables instead of config files. `LlmClient` wraps the
//! Gemini client behind the provider-neutral [`TextGeneration`] trait so the
//! chat service and its tests never see wire types.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::TextGeneration;
use types::{Generation, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client, configured from environment variables by
/// [`LlmClient::from_env`].
pub struct LlmClient {
    inner: gemini::GeminiClient,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `GEMINI_API_KEY`: provider API key (required)
    /// - `GEMINI_MODEL`: model name (e.g. "gemini-1.5-flash")
    /// - `GEMINI_BASE_URL`: custom base URL for proxies or test doubles
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.model, config.timeouts)?;
        Ok(Self { inner })
    }

    /// Return the configured model name (e.g. `"gemini-1.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        self.inner.model()
    }
}

#[async_trait::async_trait]
impl TextGeneration for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        self.inner.generate(prompt).await
    }
}
