//! JSON error responses for the non-redirect endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    PermissionError,
    NotFoundError,
    UpstreamError,
    ServerError,
    ServiceUnavailableError,
}

impl ApiErrorType {
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequestError => StatusCode::BAD_REQUEST,
            Self::PermissionError => StatusCode::FORBIDDEN,
            Self::NotFoundError => StatusCode::NOT_FOUND,
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailableError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error returned by a handler; rendered as `{"error": {"type", "message"}}`
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorType,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "type": self.kind,
                "message": self.message,
            }
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let kind = match &err {
            DomainError::NotFound { .. } => ApiErrorType::NotFoundError,
            DomainError::Validation { .. } | DomainError::InvalidId { .. } => {
                ApiErrorType::InvalidRequestError
            }
            DomainError::PermissionDenied { .. } => ApiErrorType::PermissionError,
            DomainError::Fetch { .. } => ApiErrorType::UpstreamError,
            DomainError::Storage { .. } => ApiErrorType::ServiceUnavailableError,
            DomainError::Schema { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => ApiErrorType::ServerError,
        };

        Self::new(kind, err.detail())
    }
}
