use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A link fact: a URL reference attached to an insight
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Link {
    pub id: i64,
    pub uid: String,
    pub insight_uid: String,
    pub url: String,
    pub title: Option<String>,
    pub user_id: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub insight_uid: String,
    pub url: String,
    pub title: Option<String>,
}
