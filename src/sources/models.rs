use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Source {
    pub id: i64,
    pub baseurl: String,
    pub name: Option<String>,
    /// 0..=100, seeded at 50 for a new source
    pub reliability: f64,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub baseurl: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSourceRequest {
    pub name: Option<String>,
    pub reliability: Option<f64>,
}
