use crate::errors::{AppError, AppResult};

pub struct InputValidator;

impl InputValidator {
    /// Credentials end up in a `Cookie` header and a form field, so they must be
    /// non-empty and free of line breaks.
    pub fn validate_credential(field: &str, value: &str) -> AppResult<()> {
        if value.trim().is_empty() {
            return Err(AppError::validation(field, "must not be empty"));
        }

        if value.chars().any(|c| matches!(c, '\r' | '\n' | '\0')) {
            return Err(AppError::validation(
                field,
                "contains control characters",
            ));
        }

        if value.len() > 4096 {
            return Err(AppError::validation(field, "too long"));
        }

        Ok(())
    }

    /// Keeps at most the first four characters of a secret for display.
    pub fn redact(value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        let prefix: String = value.chars().take(4).collect();
        if prefix.len() == value.len() {
            "***".to_string()
        } else {
            format!("{}***", prefix)
        }
    }
}
