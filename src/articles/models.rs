use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FetchArticleRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchArticleResponse {
    pub html: String,
    pub url: String,
    /// Number of upstream calls made before success
    pub attempts: usize,
}
