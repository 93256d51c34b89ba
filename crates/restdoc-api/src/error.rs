//! API error types
//!
//! Every error renders as a JSON body of the form
//! `{ "status": <code>, "message": <string> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use restdoc_common::HttpStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message reported when a request body is not valid JSON
pub const INVALID_JSON: &str = "The request body must be valid JSON.";

/// Message reported when the request body stream fails for reasons other than size
pub const UNREADABLE_BODY: &str = "The request body could not be read.";

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request data failed schema validation (400)
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed as JSON (400)
    #[error("{}", INVALID_JSON)]
    InvalidJson,

    /// Path, query or body could not be read (400)
    #[error("{0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit (413)
    #[error("The request body must not exceed {0} bytes.")]
    PayloadTooLarge(usize),

    /// Documentation could not be serialized or parsed (500).
    /// Details are logged, never sent to clients.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> HttpStatus {
        match self {
            ApiError::Validation(_) | ApiError::InvalidJson | ApiError::BadRequest(_) => {
                HttpStatus::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => HttpStatus::PAYLOAD_TOO_LARGE,
            ApiError::Serialization(_) => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            ApiError::Serialization(_) => "An internal error occurred.".to_string(),
            other => other.to_string(),
        };
        ErrorBody {
            status: self.status_code().code(),
            message,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

/// JSON error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "internal server error");
        }

        let status = StatusCode::from_u16(self.status_code().code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
