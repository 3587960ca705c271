use std::time::Duration;

use aide::openapi::OpenApi;
use axum::{extract::DefaultBodyLimit, Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, timeout::TimeoutLayer};

use crate::routes;
use crate::{
    state::{SharedPhotoBucket, SharedPhotoRecords},
    types::Environment,
};

/// Builds the API router with the gallery site as fallback
///
/// Body limit and site directory come from the environment.
pub fn router(
    environment: Environment,
    photo_bucket: SharedPhotoBucket,
    photo_records: SharedPhotoRecords,
) -> Router {
    let mut openapi = OpenApi::default();

    // Anything the API does not route is part of the gallery site
    let site = ServeDir::new(environment.web_root()).append_index_html_on_directories(true);
    let body_limit = environment.max_upload_body_bytes();

    routes::handler()
        .finish_api(&mut openapi)
        .fallback_service(site)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(photo_bucket))
        .layer(Extension(photo_records))
        .layer(DefaultBodyLimit::max(body_limit))
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    photo_bucket: SharedPhotoBucket,
    photo_records: SharedPhotoRecords,
) -> anyhow::Result<()> {
    let router = router(environment, photo_bucket, photo_records);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("📷 Photography backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
