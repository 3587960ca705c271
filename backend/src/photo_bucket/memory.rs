use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{PhotoBucketError, PhotoBucketResult, PhotoObject, PhotoObjectStore};

/// Photo bucket kept in memory
#[derive(Debug, Default)]
pub struct InMemoryPhotoBucket {
    objects: Mutex<HashMap<String, PhotoObject>>,
    fail_writes: AtomicBool,
}

impl InMemoryPhotoBucket {
    /// Creates an empty bucket
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<String, PhotoObject>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every stored object, sorted by key
    #[must_use]
    pub fn photos(&self) -> Vec<PhotoObject> {
        let mut photos: Vec<_> = self.objects().values().cloned().collect();
        photos.sort_by(|a, b| a.key.cmp(&b.key));
        photos
    }

    /// Makes every subsequent write fail with an upstream error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PhotoObjectStore for InMemoryPhotoBucket {
    async fn put_photo(&self, photo: PhotoObject) -> PhotoBucketResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PhotoBucketError::UpstreamError(
                "write rejected".to_string(),
            ));
        }
        self.objects().insert(photo.key.clone(), photo);
        Ok(())
    }

    async fn get_photo(&self, key: &str) -> PhotoBucketResult<Option<PhotoObject>> {
        Ok(self.objects().get(key).cloned())
    }
}
