//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::models::Claim;
use crate::auth_middleware::AUTH_USER_HEADER;
use crate::common::ApiError;

/// Authenticated user extractor
///
/// Reads the identity claim the authorization middleware propagated on the
/// request. The middleware strips any client-supplied copy of the header,
/// so its presence means the token decoded under the configured key.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AUTH_USER_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let claim: Claim = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "Propagated auth claim could not be parsed");
            ApiError::Unauthorized("Authentication required".to_string())
        })?;

        Ok(AuthedUser {
            user_id: claim.user_id,
            email: claim.email,
            username: claim.username,
        })
    }
}
