//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the chat endpoint and the read-only dashboard endpoints under a
//! single Axum router. The dashboard front-end is served elsewhere, so CORS
//! is open.

pub mod chat;
pub mod qa;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", get(chat::chat_status).post(chat::post_chat))
        .route("/api/tests", get(qa::list_tests))
        .route("/api/tests/{id}", get(qa::get_test))
        .route("/api/tests/{id}/run", post(qa::run_test))
        .route("/api/reports", get(qa::list_reports))
        .route("/api/dashboard/stats", get(qa::dashboard_stats))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
