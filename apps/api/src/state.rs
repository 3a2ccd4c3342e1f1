use std::sync::Arc;

use sqlx::SqlitePool;

use crate::llm_client::AnswerModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Client for fetching posting pages; carries a browser User-Agent.
    pub http: reqwest::Client,
    /// Pluggable answer model. Production wires the Gemini client; tests a stub.
    pub answerer: Arc<dyn AnswerModel>,
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    AppState {
        db: crate::db::test_pool().await,
        http: reqwest::Client::new(),
        answerer: Arc::new(crate::llm_client::GeminiClient::new()),
    }
}
