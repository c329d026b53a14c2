// Helper functions for safe logging

/// Masks email addresses for safe logging, keeping the first character and the domain
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("ada@example.com");
/// // Returns: "a***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

/// Masks tokens for safe logging, showing only the first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
