use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use tracing::instrument;

use crate::{photo_bucket::PHOTO_KEY_PREFIX, state::SharedPhotoBucket, types::AppError};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Serves a stored photo with its stored content type
///
/// Development stand-in for the CDN behavior that routes `/photos/*` to the bucket.
#[instrument(skip(photo_bucket))]
pub async fn get_photo(
    Extension(photo_bucket): Extension<SharedPhotoBucket>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let key = format!("{PHOTO_KEY_PREFIX}{path}");

    let Some(photo) = photo_bucket.get_photo(&key).await? else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let content_type = photo
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], photo.bytes).into_response())
}
