use std::{path::PathBuf, sync::Arc};

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    photo_bucket::InMemoryPhotoBucket,
    server,
    state::{SharedPhotoBucket, SharedPhotoRecords},
    types::Environment,
};
use photo_storage::memory::InMemoryPhotoRecords;
use tower::ServiceExt;

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// The gallery site shipped in the workspace `web/` directory
pub fn web_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../web")
}

/// Router wired to in-memory photo bucket and record table
pub struct TestSetup {
    pub router: Router,
    pub photo_bucket: Arc<InMemoryPhotoBucket>,
    pub photo_records: Arc<InMemoryPhotoRecords>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_body_limit(None)
    }

    pub fn with_body_limit(body_limit: Option<usize>) -> Self {
        setup_test_env();

        let photo_bucket = Arc::new(InMemoryPhotoBucket::new());
        let photo_records = Arc::new(InMemoryPhotoRecords::new());

        let shared_bucket: SharedPhotoBucket = photo_bucket.clone();
        let shared_records: SharedPhotoRecords = photo_records.clone();

        let environment = Environment::Development {
            web_root_override: Some(web_root()),
            body_limit_override: body_limit,
        };
        let router = server::router(environment, shared_bucket, shared_records);

        Self {
            router,
            photo_bucket,
            photo_records,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_raw_post_request(route, payload.to_string(), Some("application/json"))
            .await
    }

    /// Posts a body as-is, optionally without a `Content-Type` header
    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: impl Into<Body>,
        content_type: Option<&str>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(body.into())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_preflight_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("OPTIONS")
            .header("Origin", "https://gallery.example.com")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
