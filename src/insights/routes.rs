use axum::{routing::get, Router};

use super::handlers;

/// Creates the insights router
///
/// # Routes
/// - `GET /api/insights` - Public paginated feed
/// - `POST /api/insights` - Publish an insight (authenticated)
/// - `GET /api/insights/:uid` - Public single-fact lookup
/// - `PATCH /api/insights/:uid` - Edit own insight
/// - `DELETE /api/insights/:uid` - Delete own insight
/// - `POST /api/insights/:uid/reactions` - Like/dislike (authenticated)
/// - `GET /api/insights/:uid/comments` - Public comment listing
/// - `POST /api/insights/:uid/comments` - Comment (authenticated)
pub fn insights_routes() -> Router {
    Router::new()
        .route(
            "/api/insights",
            get(handlers::list_insights).post(handlers::create_insight),
        )
        .route(
            "/api/insights/:uid",
            get(handlers::get_insight)
                .patch(handlers::update_insight)
                .delete(handlers::delete_insight),
        )
        .route(
            "/api/insights/:uid/reactions",
            axum::routing::post(handlers::react_to_insight),
        )
        .route(
            "/api/insights/:uid/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
}
