//! S3-based photo object storage
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError, operation::get_object::GetObjectError, primitives::ByteStream,
    Client as S3Client,
};
use tracing::{debug, instrument};

pub use error::{PhotoBucketError, PhotoBucketResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryPhotoBucket;

/// Prefix under which every uploaded photo is stored
///
/// The CDN routes `/photos/*` to the photo bucket, so keys must live under this prefix.
pub const PHOTO_KEY_PREFIX: &str = "photos/";

/// A stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoObject {
    /// Storage key, `photos/{token}-{name}`
    pub key: String,
    /// Client supplied content type
    pub content_type: Option<String>,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl PhotoObject {
    /// Builds a fresh storage key for an uploaded file name
    ///
    /// The token is a UUID v4 in simple form; the name is used verbatim.
    #[must_use]
    pub fn new_key(name: &str) -> String {
        format!(
            "{PHOTO_KEY_PREFIX}{}-{name}",
            uuid::Uuid::new_v4().simple()
        )
    }
}

/// Object store holding uploaded photos
#[async_trait]
pub trait PhotoObjectStore: Send + Sync {
    /// Writes a photo object, replacing nothing (keys are freshly generated)
    ///
    /// # Errors
    ///
    /// Returns `PhotoBucketError` if the write fails
    async fn put_photo(&self, photo: PhotoObject) -> PhotoBucketResult<()>;

    /// Reads a photo object, `None` if the key does not exist
    ///
    /// # Errors
    ///
    /// Returns `PhotoBucketError` if the read fails for any reason other than a missing key
    async fn get_photo(&self, key: &str) -> PhotoBucketResult<Option<PhotoObject>>;
}

/// Photo bucket client for S3 operations
pub struct PhotoBucket {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl PhotoBucket {
    /// Creates a new photo bucket client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for photo storage
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl PhotoObjectStore for PhotoBucket {
    #[instrument(skip(self, photo), fields(key = %photo.key, size = photo.bytes.len()))]
    async fn put_photo(&self, photo: PhotoObject) -> PhotoBucketResult<()> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&photo.key)
            .set_content_type(photo.content_type)
            .body(ByteStream::from(photo.bytes))
            .send()
            .await?;

        debug!("Photo object written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_photo(&self, key: &str) -> PhotoBucketResult<Option<PhotoObject>> {
        let result = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) =>
            {
                debug!("Photo object does not exist");
                return Ok(None);
            }
            Err(e) => return Err(PhotoBucketError::from(e)),
        };

        let content_type = output.content_type().map(ToString::to_string);
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| PhotoBucketError::AwsError(format!("Failed to read object body: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(Some(PhotoObject {
            key: key.to_string(),
            content_type,
            bytes,
        }))
    }
}
