//! Shared handles passed to handlers as request extensions

use std::sync::Arc;

use photo_storage::photo_record::PhotoRecordStore;

use crate::photo_bucket::PhotoObjectStore;

/// Photo object store shared across handlers
pub type SharedPhotoBucket = Arc<dyn PhotoObjectStore>;

/// Photo record table shared across handlers
pub type SharedPhotoRecords = Arc<dyn PhotoRecordStore>;
