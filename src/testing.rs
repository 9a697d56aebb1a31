// src/testing.rs
//! Shared helpers for in-crate tests

use reqwest::Client;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth_middleware;
use crate::common::{migrations, AppState};

pub const TEST_TOKEN_KEY: &str = "unit-test-token-key";

/// Fresh application state over an in-memory database with the schema
/// applied. A single connection keeps every query on the same database.
pub async fn test_state() -> Arc<RwLock<AppState>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    migrations::run_migrations(&pool).await.expect("migrations");

    let state = AppState {
        db: pool,
        http: Client::builder().no_proxy().build().expect("http client"),
        token_key: TEST_TOKEN_KEY.to_string(),
        public_host: "inspect.app".to_string(),
        production: false,
        public_paths: Arc::new(auth_middleware::public_paths()),
    };

    Arc::new(RwLock::new(state))
}
