use std::sync::Arc;

use qa_dashboard::config::{AppConfig, ConfigError};
use qa_dashboard::llm::{LlmClient, TextGeneration};
use qa_dashboard::routes;
use qa_dashboard::services::test_runs::RunTracker;
use qa_dashboard::state::AppState;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A missing .env is fine; real env vars still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qa_dashboard=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Initialize LLM client (non-fatal: chat answers 500 if config missing).
    let llm: Option<Arc<dyn TextGeneration>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client) as Arc<dyn TextGeneration>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, chat requests will fail");
            None
        }
    };

    let state = AppState::new(llm, RunTracker::new(config.test_run_duration));

    let app = routes::app(state.clone());
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;

    tracing::info!(addr = %config.listen_addr(), "qa-dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.runs.shutdown();
    tracing::info!("qa-dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
