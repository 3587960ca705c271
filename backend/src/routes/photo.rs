use std::sync::LazyLock;

use axum::{http::HeaderValue, Extension, Json};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use photo_storage::photo_record::PhotoRecord;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    photo_bucket::PhotoObject,
    state::{SharedPhotoBucket, SharedPhotoRecords},
    types::{AppError, ValidatedJson},
};

/// `data:<media type>;base64,` as produced by `FileReader.readAsDataURL`
static DATA_URI_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:[\w.+/-]*;base64,").expect("Invalid regex"));

/// Standard alphabet, padding optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoRequest {
    /// Base64 file contents, optionally prefixed with `data:<media type>;base64,`
    #[validate(length(min = 1, message = "missing_file"))]
    pub file_as_base64: String,
    /// Original file name, used verbatim in the storage key
    #[validate(length(min = 1, message = "missing_name"))]
    pub name: String,
    /// Content type stored with the object
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadPhotoResponse {
    pub success: bool,
}

/// Strips an optional data-URI prefix and decodes the base64 payload
///
/// # Errors
///
/// Returns `base64::DecodeError` if the payload is not valid base64
pub fn decode_photo_payload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = DATA_URI_PREFIX
        .find(encoded)
        .map_or(encoded, |prefix| &encoded[prefix.end()..]);
    PAYLOAD_ENGINE.decode(data)
}

/// Stores an uploaded photo in the photo bucket
///
/// The payload is decoded before anything is written, so a malformed upload leaves
/// no object behind. Registration of the photo happens later, when the bucket's
/// creation notification reaches the registration worker.
///
/// # Errors
///
/// - `invalid_type` (400) if `type` is not a valid header value
/// - `invalid_file_encoding` (400) if `fileAsBase64` is not valid base64
/// - `upstream_error` (503) / `internal_error` (500) if the write fails
#[instrument(skip_all)]
pub async fn upload_photo(
    Extension(photo_bucket): Extension<SharedPhotoBucket>,
    ValidatedJson(payload): ValidatedJson<UploadPhotoRequest>,
) -> Result<Json<UploadPhotoResponse>, AppError> {
    info!(name = %payload.name, content_type = %payload.content_type, "Received photo upload");

    // Stored as the object's Content-Type header
    if HeaderValue::from_str(&payload.content_type).is_err() {
        return Err(AppError::validation("invalid_type"));
    }

    let bytes = decode_photo_payload(&payload.file_as_base64).map_err(|err| {
        tracing::debug!("Undecodable photo payload: {err}");
        AppError::validation("invalid_file_encoding")
    })?;

    let key = PhotoObject::new_key(&payload.name);
    let content_type = Some(payload.content_type).filter(|ct| !ct.is_empty());

    photo_bucket
        .put_photo(PhotoObject {
            key: key.clone(),
            content_type,
            bytes,
        })
        .await?;

    info!(key = %key, "Stored photo object");

    Ok(Json(UploadPhotoResponse { success: true }))
}

/// Lists every registered photo
///
/// Full scan of the photo record table. Order is whatever the table returns and is
/// not stable between calls. Photos uploaded moments ago may be missing until their
/// registration has run.
#[instrument(skip_all)]
pub async fn list_photos(
    Extension(photo_records): Extension<SharedPhotoRecords>,
) -> Result<Json<Vec<PhotoRecord>>, AppError> {
    let records = photo_records.scan_all().await?;

    info!(count = records.len(), "Listed photo records");

    Ok(Json(records))
}
