// Helper functions for safe logging

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 {
            format!("{}***@{}", &parts[0][..1.min(parts[0].len())], parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            "***".to_string()
        }
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log_masks_local_part() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
    }

    #[test]
    fn test_safe_email_log_rejects_malformed() {
        assert_eq!(safe_email_log("no-at-sign"), "***@***.***");
        assert_eq!(safe_email_log("a"), "***@***.***");
    }

    #[test]
    fn test_safe_token_log() {
        assert_eq!(safe_token_log("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(safe_token_log("short"), "***");
    }
}
