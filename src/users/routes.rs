use axum::{routing::get, Router};

use super::handlers;

/// Creates the users router
///
/// # Routes
/// - `GET /api/users/:id` - Public lookup by numeric id
/// - `PATCH /api/users/:id` - Update own account
/// - `DELETE /api/users/:id` - Delete own account
pub fn users_routes() -> Router {
    Router::new().route(
        "/api/users/:id",
        get(handlers::get_user)
            .patch(handlers::update_user)
            .delete(handlers::delete_user),
    )
}
