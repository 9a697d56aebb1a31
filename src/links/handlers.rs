//! Link handlers

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{CreateLinkRequest, Link};
use crate::auth::AuthedUser;
use crate::common::{generate_link_uid, ApiError, AppState, Validator};
use crate::insights::reducer::{ACTION_DELETE, ACTION_PREPEND};

/// GET /api/links/:uid - Public listing of links attached to an insight
pub async fn list_links(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(insight_uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let links = sqlx::query_as::<_, Link>(
        "SELECT * FROM links WHERE insight_uid = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(&insight_uid)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(links))
}

/// POST /api/links - Attach a link to an insight
pub async fn create_link(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let insight_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM insights WHERE uid = ?")
            .bind(&request.insight_uid)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    if insight_exists == 0 {
        return Err(ApiError::NotFound("Insight not found".to_string()));
    }

    let uid = generate_link_uid();

    sqlx::query(
        "INSERT INTO links (uid, insight_uid, url, title, user_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&uid)
    .bind(&request.insight_uid)
    .bind(request.url.trim())
    .bind(&request.title)
    .bind(user.user_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let link = fetch_link(&state, &uid).await?;

    info!(uid = %uid, insight_uid = %request.insight_uid, "Link created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "action": ACTION_PREPEND, "link": link })),
    ))
}

/// DELETE /api/links/:uid - Remove a link; authors only
pub async fn delete_link(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let link = fetch_link(&state, &uid).await?;
    if link.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "You can only delete your own links".to_string(),
        ));
    }

    sqlx::query("DELETE FROM links WHERE uid = ?")
        .bind(&uid)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(uid = %uid, "Link deleted");

    Ok(Json(serde_json::json!({ "action": ACTION_DELETE, "uid": uid })))
}

async fn fetch_link(state: &AppState, uid: &str) -> Result<Link, ApiError> {
    sqlx::query_as::<_, Link>("SELECT * FROM links WHERE uid = ?")
        .bind(uid)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))
}
