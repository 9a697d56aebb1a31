//! Source handlers

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{CreateSourceRequest, Source, UpdateSourceRequest};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};

/// POST /api/sources - Register a new source
pub async fn create_source(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Json(request): Json<CreateSourceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();
    let baseurl = request.baseurl.trim().to_lowercase();

    sqlx::query("INSERT INTO sources (baseurl, name) VALUES (?, ?)")
        .bind(&baseurl)
        .bind(&request.name)
        .execute(&state.db)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                // unlike registration's 401, a duplicate source is a 409
                ApiError::Conflict("Source already exists".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

    let source = fetch_source(&state, &baseurl).await?;

    info!(baseurl = %baseurl, "Source created");

    Ok((StatusCode::CREATED, Json(source)))
}

/// GET /api/sources/:baseurl - Public lookup by base URL
pub async fn get_source(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(baseurl): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let source = fetch_source(&state, &baseurl.to_lowercase()).await?;
    Ok(Json(source))
}

/// PATCH /api/sources/:baseurl - Adjust name or reliability score
pub async fn update_source(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(baseurl): Path<String>,
    Json(request): Json<UpdateSourceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.name.is_none() && request.reliability.is_none() {
        return Err(ApiError::ValidationError(
            "At least one field must be provided".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();
    let baseurl = baseurl.to_lowercase();

    // confirm it exists before patching
    fetch_source(&state, &baseurl).await?;

    if let Some(name) = &request.name {
        sqlx::query("UPDATE sources SET name = ? WHERE baseurl = ?")
            .bind(name)
            .bind(&baseurl)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    }

    if let Some(reliability) = request.reliability {
        let clamped = reliability.clamp(0.0, 100.0);
        sqlx::query("UPDATE sources SET reliability = ? WHERE baseurl = ?")
            .bind(clamped)
            .bind(&baseurl)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    }

    let source = fetch_source(&state, &baseurl).await?;

    info!(baseurl = %baseurl, "Source updated");

    Ok(Json(source))
}

async fn fetch_source(state: &AppState, baseurl: &str) -> Result<Source, ApiError> {
    sqlx::query_as::<_, Source>("SELECT * FROM sources WHERE baseurl = ?")
        .bind(baseurl)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Source not found".to_string()))
}
