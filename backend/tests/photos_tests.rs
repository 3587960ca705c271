mod common;

use common::*;

use http::{header, StatusCode};

#[tokio::test]
async fn test_get_uploaded_photo() {
    let setup = TestSetup::new();

    setup
        .send_post_request("/photo", create_upload_request(&CAT_PNG, "cat.png", "image/png"))
        .await
        .expect("Failed to send request");
    let key = setup.photo_bucket.photos()[0].key.clone();

    let response = setup
        .send_get_request(&format!("/{key}"))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response_bytes(response).await, CAT_PNG);
}

#[tokio::test]
async fn test_get_photo_without_content_type() {
    let setup = TestSetup::new();

    setup
        .send_post_request(
            "/photo",
            serde_json::json!({ "fileAsBase64": "AAE=", "name": "blob", "type": "" }),
        )
        .await
        .expect("Failed to send request");
    let key = setup.photo_bucket.photos()[0].key.clone();

    let response = setup
        .send_get_request(&format!("/{key}"))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}

#[tokio::test]
async fn test_get_missing_photo() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/photos/nope-cat.png")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
