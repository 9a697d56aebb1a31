use super::models::CreateLinkRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<CreateLinkRequest> for CreateLinkRequest {
    fn validate(&self, data: &CreateLinkRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.insight_uid.trim().is_empty() {
            result.add_error("insight_uid", "Insight uid is required");
        }

        let url = data.url.trim();
        if url.is_empty() {
            result.add_error("url", "URL is required");
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error("url", "URL must start with http:// or https://");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_scheme_is_required() {
        let request = CreateLinkRequest {
            insight_uid: "N_K7NP3X".to_string(),
            url: "example.com/story".to_string(),
            title: None,
        };
        assert!(!request.validate(&request).is_valid);
    }

    #[test]
    fn test_valid_link_passes() {
        let request = CreateLinkRequest {
            insight_uid: "N_K7NP3X".to_string(),
            url: "https://example.com/story".to_string(),
            title: Some("Background".to_string()),
        };
        assert!(request.validate(&request).is_valid);
    }
}
