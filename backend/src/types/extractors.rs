//! Custom extractors for request validation

use std::borrow::Cow;

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use schemars::JsonSchema;
use validator::Validate;

use crate::types::error::AppError;

/// JSON extractor that validates the payload
///
/// The body is parsed as JSON whatever the `Content-Type` header says: browsers
/// posting a string body send `text/plain`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "payload_too_large",
                    "Request body is too large",
                    false,
                )
            } else {
                AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_body",
                    "Request body could not be read",
                    false,
                )
            }
        })?;

        let payload: T = serde_json::from_slice(&body).map_err(|err| {
            tracing::debug!("Invalid JSON payload: {err}");
            AppError::new(
                StatusCode::BAD_REQUEST,
                "invalid_json",
                "Invalid JSON payload",
                false,
            )
        })?;

        payload.validate().map_err(|errors| {
            // The message of the first failing field, by field name, is the error code
            let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
            field_errors.sort_by(|(a, _), (b, _)| a.cmp(b));

            field_errors
                .into_iter()
                .find_map(|(_, field)| field.first())
                .and_then(|error| match error.message {
                    Some(Cow::Borrowed(code)) => Some(code),
                    _ => None,
                })
                .map_or_else(
                    || AppError::validation("validation_error"),
                    AppError::validation,
                )
        })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for ValidatedJson<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Same wire format as Json<T>
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}
