use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the links router
///
/// # Routes
/// - `GET /api/links/:uid` - Links attached to the insight with that uid
/// - `POST /api/links` - Attach a link (authenticated)
/// - `DELETE /api/links/:uid` - Delete own link (link uid)
pub fn links_routes() -> Router {
    Router::new()
        .route("/api/links", post(handlers::create_link))
        .route(
            "/api/links/:uid",
            get(handlers::list_links).delete(handlers::delete_link),
        )
}
