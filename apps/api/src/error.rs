//! # API Error Type
//!
//! Unified error type for HTTP handlers. This is the only place that builds
//! error envelopes.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PetVax                                 │
//! │                                                                         │
//! │  Handler                                                               │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── JsonRejection / PathRejection ──► Malformed   → 400        │
//! │         ├── ValidationErrors ───────────────► Validation  → 400        │
//! │         ├── CoreError::PetNotFound ─────────► NotFound    → 404        │
//! │         ├── unmatched path ─────────────────► NoRoute     → 404        │
//! │         ├── unsupported method ─────────────► MethodNotAllowed → 405   │
//! │         └── CoreError::Storage ─────────────► Internal    → 500        │
//! │                                                                         │
//! │  Every error body uses the response envelope:                          │
//! │  { "message": "...", "data": null | { field: message } }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use petvax_core::dto::ApiResponse;
use petvax_core::{CoreError, PetId, ValidationErrors};
use tracing::{debug, error};

/// Message for 400 responses caused by validation failures.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Message for unreadable bodies and bad path parameters.
pub const MALFORMED_REQUEST: &str =
    "Malformed JSON request or unreadable message. Please check your input.";

/// Message for requests no route matches.
pub const NO_ROUTE: &str = "No resource found at the requested path";

/// Message for a known path requested with an unsupported method.
pub const METHOD_NOT_ALLOWED: &str = "Request method not supported for this resource";

/// Message for 500 responses; details only go to the log.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// API error returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Pet with ID: {0} was not found.")]
    NotFound(PetId),

    /// No route matches the path (404)
    #[error("No route matches the requested path")]
    NoRoute,

    /// The path exists but not for this method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Input validation failed (400)
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Body or path could not be read (400). Holds the extractor's reason.
    #[error("Malformed request: {0}")]
    Malformed(String),

    /// Internal server error (500). Holds the underlying detail.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound(id) => {
                let body: ApiResponse<()> =
                    ApiResponse::message_only(CoreError::not_found(id).to_string());
                (status, Json(body)).into_response()
            }
            ApiError::NoRoute => {
                let body: ApiResponse<()> = ApiResponse::message_only(NO_ROUTE);
                (status, Json(body)).into_response()
            }
            ApiError::MethodNotAllowed => {
                let body: ApiResponse<()> = ApiResponse::message_only(METHOD_NOT_ALLOWED);
                (status, Json(body)).into_response()
            }
            ApiError::Validation(errors) => {
                debug!(fields = errors.len(), "Request failed validation");
                let body = ApiResponse::with_data(VALIDATION_FAILED, errors.field_messages());
                (status, Json(body)).into_response()
            }
            ApiError::Malformed(reason) => {
                debug!(%reason, "Malformed request");
                let body: ApiResponse<()> = ApiResponse::message_only(MALFORMED_REQUEST);
                (status, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                error!(%detail, "Request failed with internal error");
                let body: ApiResponse<()> = ApiResponse::message_only(UNEXPECTED_ERROR);
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PetNotFound { id } => ApiError::NotFound(id),
            CoreError::Validation(errors) => ApiError::Validation(errors),
            CoreError::Storage(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}
