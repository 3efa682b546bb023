//! Error taxonomy and the single translation point into HTTP responses.
//!
//! Handlers and middleware return `Result<_, ApiError>`; axum short-circuits
//! the chain on the first `Err`, and `IntoResponse` below writes the envelope:
//!
//! ```json
//! { "error": { "name": "NotFoundError", "message": "...", "statusCode": 404 } }
//! ```

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{StoreError, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure the request pipeline can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Referenced resource absent, or no route matched.
    #[error("{0}")]
    NotFound(String),

    /// Payload failed a field rule, or a required query parameter is missing.
    #[error("{0}")]
    Validation(String),

    /// Missing or incorrect credential.
    #[error("{0}")]
    Auth(String),

    /// Body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Request did not complete within the configured timeout.
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn endpoint_not_found() -> Self {
        ApiError::NotFound("Endpoint not found".to_string())
    }

    pub fn payload_too_large() -> Self {
        ApiError::PayloadTooLarge("Request body exceeds the size limit".to_string())
    }

    pub fn request_timeout() -> Self {
        ApiError::Timeout("Request timed out".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable kind name reported to clients.
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Validation(_) => "ValidationError",
            ApiError::Auth(_) => "AuthError",
            ApiError::PayloadTooLarge(_) => "PayloadTooLargeError",
            ApiError::Timeout(_) => "RequestTimeoutError",
            ApiError::Internal(_) => "InternalServerError",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.0)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
    pub status_code: u16,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            error: ErrorDetail {
                name: err.name().to_string(),
                message: err.to_string(),
                status_code: err.status_code().as_u16(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.name(), error = %self, "Request failed");
        } else {
            tracing::warn!(kind = self.name(), status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}
