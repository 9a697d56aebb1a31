use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
