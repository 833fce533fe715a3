use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// Non-zero `code` from the remote service. Displays the upstream message as-is.
    #[error("{message}")]
    Upstream { code: i64, message: String },

    #[error("Upstream protocol error: {0}")]
    UpstreamProtocol(String),

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

/// Custom result type
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_locator(locator: &str, reason: impl ToString) -> Self {
        Self::InvalidLocator {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_method(method: &str) -> Self {
        Self::Configuration(format!("unknown upload method: {}", method))
    }

    pub fn upstream(code: i64, message: &str) -> Self {
        let message = if message.is_empty() {
            format!("upstream rejected the upload (code {})", code)
        } else {
            message.to_string()
        };
        Self::Upstream { code, message }
    }

    /// Errors that will fail the same way again unless the caller changes something.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_)
                | AppError::InvalidLocator { .. }
                | AppError::Validation { .. }
                | AppError::Json(_)
        )
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Upstream { .. } | AppError::UpstreamProtocol(_)
        )
    }
}
