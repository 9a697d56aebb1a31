// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use reqwest::Client;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod articles;
mod auth;
mod auth_middleware;
mod common;
mod insights;
mod links;
mod logging_middleware;
mod sources;
#[cfg(test)]
mod testing;
mod users;

use common::AppState;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://inspect.db".to_string());

    // the token codec is unusable without a secret; refuse to start
    let token_key = env::var("TOKEN_KEY").unwrap_or_default();
    if token_key.is_empty() {
        anyhow::bail!("TOKEN_KEY must be set to a non-empty secret");
    }

    let public_host = env::var("PUBLIC_HOST").unwrap_or_else(|_| "inspect.app".to_string());
    let production = env::var("APP_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let http_client = Client::builder().no_proxy().build()?;

    let app_state = AppState {
        db: pool,
        http: http_client,
        token_key,
        public_host,
        production,
        public_paths: Arc::new(auth_middleware::public_paths()),
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        .merge(auth::auth_routes())
        .merge(users::users_routes())
        .merge(sources::sources_routes())
        .merge(insights::insights_routes())
        .merge(links::links_routes())
        .merge(articles::articles_routes())
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(middleware::from_fn(auth_middleware::authorize_request))
        .layer(Extension(shared.clone()))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn cors_layer() -> CorsLayer {
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-access-token"),
        ])
        .allow_credentials(true)
}
