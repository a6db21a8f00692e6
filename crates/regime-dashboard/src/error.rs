//! API errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use regime_store::StoreError;
use tracing::{debug, error};

use crate::types::ErrorBody;

/// Error returned by API handlers, rendered as `{ "error", "message" }`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_parameter", message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn no_valid_run() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "no_valid_run",
            "No valid pipeline run is available",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// Map a store error; missing or unparseable artifacts become 404 with
    /// `not_found_code`.
    pub fn from_store(err: StoreError, not_found_code: &'static str) -> Self {
        match err {
            StoreError::NoValidRun => Self::no_valid_run(),
            e if e.is_missing() => {
                debug!(error = %e, code = not_found_code, "Artifact unavailable");
                Self::not_found(not_found_code, "The requested results are not available")
            }
            e => {
                error!(error = %e, "Failed to read results artifact");
                Self::internal("Failed to read results")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
