use super::models::FetchArticleRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<FetchArticleRequest> for FetchArticleRequest {
    fn validate(&self, data: &FetchArticleRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let url = data.url.trim();
        if url.is_empty() {
            result.add_error("url", "A valid article URL is required");
            return result;
        }

        match reqwest::Url::parse(url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    result.add_error("url", "Only http and https URLs are supported");
                }
            }
            Err(_) => {
                result.add_error("url", "A valid article URL is required");
            }
        }

        result
    }
}
