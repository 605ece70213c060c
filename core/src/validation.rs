// Validation logic for external resource URLs

use crate::models::{ErrorCode, StatusLevel};
use url::Url;

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URLが空です")]
    EmptyUrl,

    #[error("無効なURLです: {0}")]
    InvalidUrl(String),
}

impl ValidationError {
    /// Convert to ErrorCode
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyUrl => ErrorCode::ValidationEmptyUrl,
            ValidationError::InvalidUrl(_) => ErrorCode::ValidationInvalidUrl,
        }
    }

    /// Get status level for this validation error
    pub fn status_level(&self) -> StatusLevel {
        StatusLevel::Warning
    }

    /// Get context for error (e.g., the rejected input)
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            ValidationError::InvalidUrl(input) => Some(serde_json::json!({ "url": input })),
            ValidationError::EmptyUrl => None,
        }
    }
}

/// Validate a user-supplied resource URL
///
/// # Rules
/// - Surrounding whitespace is ignored
/// - The remainder must not be empty
/// - It must parse as an absolute URL (relative references are rejected)
///
/// Returns the trimmed URL text, which is what gets stored.
pub fn validate_resource_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;

    Ok(trimmed.to_string())
}
