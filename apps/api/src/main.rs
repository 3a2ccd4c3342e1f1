mod answer;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod scan;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::scan::fetcher::BROWSER_USER_AGENT;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoAppli API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and the schema
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // HTTP client for posting-page fetches
    let http = reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // Gemini client; the API key is a stored setting, supplied per call
    let answerer = Arc::new(GeminiClient::new());
    info!("Gemini client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState { db, http, answerer };

    // Build router. CORS stays permissive: the extension popup calls from an
    // extension origin. CatchPanic turns a handler panic into the error
    // envelope instead of a dropped connection.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(errors::handle_panic));

    // Companion service for a local browser: loopback only
    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
