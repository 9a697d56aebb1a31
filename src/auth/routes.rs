//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/register` - Create an account and issue a token
/// - `POST /api/login` - Verify credentials and re-issue a token
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
}
