//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use photo_storage::photo_record::PhotoRecordStorageError;
use schemars::JsonSchema;
use serde::Serialize;

use crate::photo_bucket::PhotoBucketError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// Create a 400 error for a request that failed field validation
    #[must_use]
    pub const fn validation(code: &'static str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            code,
            "Request validation failed",
            false,
        )
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }

    const fn upstream(what: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "upstream_error", what, true)
    }

    const fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
            true,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert photo bucket errors to application errors
impl From<PhotoBucketError> for AppError {
    fn from(err: PhotoBucketError) -> Self {
        match &err {
            PhotoBucketError::UpstreamError(msg) => {
                tracing::error!("S3 upstream error: {msg}");
                Self::upstream("Photo storage temporarily unavailable")
            }
            PhotoBucketError::S3Error(msg) | PhotoBucketError::AwsError(msg) => {
                tracing::error!("S3/AWS error: {msg}");
                Self::internal()
            }
        }
    }
}

/// Convert photo record storage errors to application errors
impl From<PhotoRecordStorageError> for AppError {
    fn from(err: PhotoRecordStorageError) -> Self {
        if err.is_upstream_error() {
            tracing::error!("DynamoDB upstream error: {err}");
            Self::upstream("Photo records temporarily unavailable")
        } else {
            tracing::error!("DynamoDB error: {err}");
            Self::internal()
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
