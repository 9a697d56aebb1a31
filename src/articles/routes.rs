use axum::{routing::post, Router};

use super::handlers;

/// Creates the articles router
///
/// # Routes
/// - `POST /api/articles` - Server-side HTML retrieval for a URL
pub fn articles_routes() -> Router {
    Router::new().route("/api/articles", post(handlers::fetch_article))
}
