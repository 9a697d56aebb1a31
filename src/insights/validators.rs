use super::models::{CreateInsightRequest, ReactionRequest};
use crate::common::{ValidationResult, Validator};

const MAX_TEXT_LENGTH: usize = 2000;

impl Validator<CreateInsightRequest> for CreateInsightRequest {
    fn validate(&self, data: &CreateInsightRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.text.trim().is_empty() {
            result.add_error("text", "Insight text is required");
        }
        if data.text.len() > MAX_TEXT_LENGTH {
            result.add_error("text", "Insight text must not exceed 2000 characters");
        }

        if let Some(url) = &data.url {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error("url", "URL must start with http:// or https://");
            }
        }

        result
    }
}

/// A reaction is either a like or a dislike
pub fn validate_reaction(request: &ReactionRequest) -> Result<(), String> {
    match request.kind.as_str() {
        "like" | "dislike" => Ok(()),
        other => Err(format!("Unknown reaction kind '{}'", other)),
    }
}
