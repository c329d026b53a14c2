// Shared validation types

use regex::Regex;
use std::sync::OnceLock;

use super::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Accumulates field errors so a caller sees every problem in one response
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Ok when no errors were recorded, otherwise an InvalidInput error
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$")
            .expect("email pattern is a valid regex")
    })
}

/// Strips surrounding whitespace, counting the byte order mark U+FEFF as whitespace
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// `local@domain.tld` shape check; no whitespace, exactly one `@`, a dot after it
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
