//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional upstream LLM client and the simulated test-run
//! tracker. Fixture data is static and not part of the state.

use std::sync::Arc;

use crate::llm::TextGeneration;
use crate::services::test_runs::RunTracker;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if `GEMINI_API_KEY` is not configured.
    pub llm: Option<Arc<dyn TextGeneration>>,
    pub runs: RunTracker,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn TextGeneration>>, runs: RunTracker) -> Self {
        Self { llm, runs }
    }

    /// Borrow the LLM client as a trait object, if configured.
    #[must_use]
    pub fn llm(&self) -> Option<&dyn TextGeneration> {
        self.llm.as_deref()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
