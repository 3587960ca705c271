//! Service metadata: health check and API documentation

use aide::{
    axum::{routing::get, ApiRouter, IntoApiResponse},
    openapi::OpenApi,
    scalar::Scalar,
};
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::types::Environment;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
}

pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Photography API Docs");

    ApiRouter::new()
        .api_route("/health", get(health))
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", axum::routing::get(openapi_schema))
}

/// Reports liveness and the running build
async fn health() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    })
}

#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<OpenApi>,
) -> impl IntoResponse {
    if !environment.show_api_docs() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(openapi).into_response()
}
