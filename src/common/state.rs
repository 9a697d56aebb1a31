// Application state shared across all modules

use regex::Regex;
use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state containing the database pool, outbound HTTP client
/// and process-wide configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    /// Shared secret for the token codec. Required at startup.
    pub token_key: String,
    /// Public hostname substituted for localhost:3000 in production
    pub public_host: String,
    pub production: bool,
    /// Compiled list of paths reachable without a token
    pub public_paths: Arc<Vec<Regex>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token_key", &"<secret>")
            .field("public_host", &self.public_host)
            .field("production", &self.production)
            .finish()
    }
}
