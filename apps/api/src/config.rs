use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Everything has a sensible local default: the service is a localhost
/// companion for the browser extension and must come up with zero setup.
/// The Gemini API key is deliberately NOT configuration - it lives in the
/// settings store, where the extension popup writes it.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:autoappli.db".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8765".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
