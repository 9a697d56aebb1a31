use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An insight fact in the feed
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Insight {
    pub id: i64,
    pub uid: String,
    pub text: String,
    pub url: Option<String>,
    pub source_baseurl: Option<String>,
    pub user_id: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub uid: String,
    pub insight_uid: String,
    pub user_id: i64,
    pub username: String,
    pub text: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInsightRequest {
    pub text: String,
    pub url: Option<String>,
    pub source_baseurl: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInsightRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub source_baseurl: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionRequest {
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Feed pagination for infinite scroll
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}
