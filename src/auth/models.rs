//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity claim embedded in an auth token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}

/// User database model
///
/// The password digest and issued token never leave the server.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    #[serde(skip_serializing)]
    pub token_issued_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login accepts the account email or, interchangeably, the username
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}
