//! Insight handlers

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{
    Comment, CreateCommentRequest, CreateInsightRequest, FeedQuery, Insight, ReactionRequest,
    UpdateInsightRequest,
};
use super::reducer::FeedAction;
use super::validators;
use crate::auth::AuthedUser;
use crate::common::{
    generate_comment_uid, generate_insight_uid, ApiError, AppState, Validator,
};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 50;

/// GET /api/insights - Public paginated feed, newest first
pub async fn list_insights(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let insights = sqlx::query_as::<_, Insight>(
        "SELECT * FROM insights ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(insights))
}

/// GET /api/insights/:uid - Public single-fact lookup
pub async fn get_insight(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let insight = fetch_insight(&state, &uid).await?;
    Ok(Json(insight))
}

/// POST /api/insights - Publish a new insight
pub async fn create_insight(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateInsightRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let uid = generate_insight_uid();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO insights (uid, text, url, source_baseurl, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&uid)
    .bind(request.text.trim())
    .bind(&request.url)
    .bind(&request.source_baseurl)
    .bind(user.user_id)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let insight = fetch_insight(&state, &uid).await?;

    info!(uid = %uid, user_id = user.user_id, "Insight created");

    Ok((
        StatusCode::CREATED,
        Json(FeedAction::Prepend(insight).envelope()),
    ))
}

/// PATCH /api/insights/:uid - Edit an insight; authors only
pub async fn update_insight(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(uid): Path<String>,
    Json(request): Json<UpdateInsightRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let existing = fetch_insight(&state, &uid).await?;
    if existing.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "You can only edit your own insights".to_string(),
        ));
    }

    if let Some(text) = &request.text {
        if text.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "Insight text must not be empty".to_string(),
            ));
        }
    }

    let mut updates = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(text) = &request.text {
        updates.push("text = ?");
        binds.push(text.trim().to_string());
    }
    if let Some(url) = &request.url {
        updates.push("url = ?");
        binds.push(url.clone());
    }
    if let Some(source_baseurl) = &request.source_baseurl {
        updates.push("source_baseurl = ?");
        binds.push(source_baseurl.clone());
    }

    if updates.is_empty() {
        return Err(ApiError::ValidationError(
            "At least one field must be provided".to_string(),
        ));
    }

    updates.push("updated_at = ?");
    binds.push(chrono::Utc::now().to_rfc3339());

    let sql = format!("UPDATE insights SET {} WHERE uid = ?", updates.join(", "));
    let mut query = sqlx::query(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }
    query = query.bind(&uid);

    query.execute(&state.db).await.map_err(ApiError::DatabaseError)?;

    let insight = fetch_insight(&state, &uid).await?;

    info!(uid = %uid, "Insight updated");

    Ok(Json(FeedAction::Merge(insight).envelope()))
}

/// DELETE /api/insights/:uid - Remove an insight; authors only
pub async fn delete_insight(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let existing = fetch_insight(&state, &uid).await?;
    if existing.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "You can only delete your own insights".to_string(),
        ));
    }

    sqlx::query("DELETE FROM insights WHERE uid = ?")
        .bind(&uid)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(uid = %uid, "Insight deleted");

    Ok(Json(FeedAction::Delete { uid }.envelope()))
}

/// POST /api/insights/:uid/reactions - Like or dislike an insight
///
/// One reaction per user per insight; reacting again switches the kind.
pub async fn react_to_insight(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(uid): Path<String>,
    Json(request): Json<ReactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validators::validate_reaction(&request).map_err(ApiError::ValidationError)?;

    let state = state_lock.read().await.clone();

    fetch_insight(&state, &uid).await?;

    sqlx::query(
        r#"
        INSERT INTO reactions (insight_uid, user_id, kind)
        VALUES (?, ?, ?)
        ON CONFLICT (insight_uid, user_id) DO UPDATE SET kind = excluded.kind
        "#,
    )
    .bind(&uid)
    .bind(user.user_id)
    .bind(&request.kind)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    // recount rather than increment; the upsert may have switched a kind
    sqlx::query(
        r#"
        UPDATE insights SET
            likes = (SELECT COUNT(*) FROM reactions WHERE insight_uid = ?1 AND kind = 'like'),
            dislikes = (SELECT COUNT(*) FROM reactions WHERE insight_uid = ?1 AND kind = 'dislike')
        WHERE uid = ?1
        "#,
    )
    .bind(&uid)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let insight = fetch_insight(&state, &uid).await?;

    Ok(Json(FeedAction::Merge(insight).envelope()))
}

/// GET /api/insights/:uid/comments - Public comment listing, oldest first
pub async fn list_comments(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    fetch_insight(&state, &uid).await?;

    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE insight_uid = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(&uid)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(comments))
}

/// POST /api/insights/:uid/comments - Comment on an insight
pub async fn create_comment(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(uid): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "Comment text is required".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();

    fetch_insight(&state, &uid).await?;

    let comment_uid = generate_comment_uid();

    sqlx::query(
        "INSERT INTO comments (uid, insight_uid, user_id, username, text) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&comment_uid)
    .bind(&uid)
    .bind(user.user_id)
    .bind(&user.username)
    .bind(request.text.trim())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE uid = ?")
        .bind(&comment_uid)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(insight_uid = %uid, comment_uid = %comment_uid, "Comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

async fn fetch_insight(state: &AppState, uid: &str) -> Result<Insight, ApiError> {
    sqlx::query_as::<_, Insight>("SELECT * FROM insights WHERE uid = ?")
        .bind(uid)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Insight not found".to_string()))
}
