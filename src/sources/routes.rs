use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the sources router
///
/// # Routes
/// - `POST /api/sources` - Register a new source (authenticated)
/// - `GET /api/sources/:baseurl` - Public lookup by base URL
/// - `PATCH /api/sources/:baseurl` - Adjust name/reliability (authenticated)
pub fn sources_routes() -> Router {
    Router::new()
        .route("/api/sources", post(handlers::create_source))
        .route(
            "/api/sources/:baseurl",
            get(handlers::get_source).patch(handlers::update_source),
        )
}
