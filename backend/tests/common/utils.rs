use axum::response::Response;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use serde_json::json;

/// Ten bytes starting with the PNG signature
pub const CAT_PNG: [u8; 10] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Raw response body
pub async fn response_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Upload body as the gallery client sends it, with a data-URI prefix
pub fn create_upload_request(bytes: &[u8], name: &str, content_type: &str) -> serde_json::Value {
    json!({
        "fileAsBase64": format!("data:{content_type};base64,{}", STANDARD.encode(bytes)),
        "name": name,
        "type": content_type,
    })
}

/// Splits `photos/{token}-{name}` into token and name
pub fn split_photo_key(key: &str) -> (&str, &str) {
    key.strip_prefix("photos/")
        .and_then(|rest| rest.split_once('-'))
        .unwrap_or_else(|| panic!("unexpected photo key: {key}"))
}
