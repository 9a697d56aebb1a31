use super::models::CreateSourceRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<CreateSourceRequest> for CreateSourceRequest {
    fn validate(&self, data: &CreateSourceRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let baseurl = data.baseurl.trim();
        if baseurl.is_empty() {
            result.add_error("baseurl", "Base URL is required");
        } else {
            if baseurl.contains(char::is_whitespace) {
                result.add_error("baseurl", "Base URL must not contain whitespace");
            }
            if !baseurl.contains('.') {
                result.add_error("baseurl", "Base URL must be a hostname");
            }
            if baseurl.contains("://") {
                result.add_error("baseurl", "Base URL must not include a scheme");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(baseurl: &str) -> CreateSourceRequest {
        CreateSourceRequest {
            baseurl: baseurl.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_hostname_is_accepted() {
        let r = request("nytimes.com");
        assert!(r.validate(&r).is_valid);
    }

    #[test]
    fn test_scheme_is_rejected() {
        let r = request("https://nytimes.com");
        assert!(!r.validate(&r).is_valid);
    }

    #[test]
    fn test_empty_baseurl_is_rejected() {
        let r = request("  ");
        assert!(!r.validate(&r).is_valid);
    }
}
