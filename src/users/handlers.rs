//! User handlers

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{MessageResponse, UpdateUserRequest};
use crate::auth::handlers::digest_password;
use crate::auth::{AuthedUser, User};
use crate::common::{ApiError, AppState, Validator};

/// GET /api/users/:id - Public lookup by numeric id
pub async fn get_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// PATCH /api/users/:id - Update the authenticated user's own account
pub async fn update_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if user.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You can only modify your own account".to_string(),
        ));
    }

    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let mut updates = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(username) = &request.username {
        updates.push("username = ?");
        binds.push(username.trim().to_string());
    }
    if let Some(email) = &request.email {
        updates.push("email = ?");
        binds.push(email.trim().to_lowercase());
    }
    if let Some(password) = &request.password {
        updates.push("password = ?");
        binds.push(digest_password(password));
    }

    let sql = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));
    let mut query = sqlx::query(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }
    query = query.bind(user_id);

    query.execute(&state.db).await.map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::Conflict("Username or email already in use".to_string())
        } else {
            ApiError::DatabaseError(e)
        }
    })?;

    let updated = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = user_id, "User updated");

    Ok(Json(updated))
}

/// DELETE /api/users/:id - Delete the authenticated user's own account
pub async fn delete_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if user.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You can only delete your own account".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(user_id = user_id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
