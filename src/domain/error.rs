use thiserror::Error;

use super::team::TeamValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Fetch error: {url} - {message}")]
    Fetch { url: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Message without the kind prefix, suitable for user-facing notices
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::InvalidId { message }
            | Self::PermissionDenied { message }
            | Self::Storage { message }
            | Self::Schema { message }
            | Self::Configuration { message }
            | Self::Internal { message } => message.clone(),
            Self::Fetch { url, message } => format!("{} ({})", message, url),
        }
    }
}

impl From<TeamValidationError> for DomainError {
    fn from(err: TeamValidationError) -> Self {
        match err {
            TeamValidationError::InvalidId(_) => Self::invalid_id(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}
