use super::models::UpdateUserRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<UpdateUserRequest> for UpdateUserRequest {
    fn validate(&self, data: &UpdateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.username.is_none() && data.email.is_none() && data.password.is_none() {
            result.add_error("body", "At least one field must be provided");
        }

        if let Some(username) = &data.username {
            if username.trim().is_empty() {
                result.add_error("username", "Username must not be empty");
            }
            if username.len() > 64 {
                result.add_error("username", "Username must not exceed 64 characters");
            }
        }

        if let Some(email) = &data.email {
            if !email.contains('@') {
                result.add_error("email", "A valid email is required");
            }
        }

        if let Some(password) = &data.password {
            if password.is_empty() {
                result.add_error("password", "Password must not be empty");
            }
        }

        result
    }
}
