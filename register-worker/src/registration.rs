//! Registration of newly created photo objects
//!
//! Each `ObjectCreated:*` record becomes one photo record with a fresh ID. The worker
//! keeps no memory of what it has already registered, so a redelivered batch registers
//! its keys again under new IDs.

use std::sync::Arc;

use photo_storage::{
    events::ObjectCreatedEvent,
    photo_record::{PhotoRecord, PhotoRecordStorageResult, PhotoRecordStore},
};
use tracing::{info, instrument, warn};

/// Writes photo records for object-creation notifications
#[derive(Clone)]
pub struct RegistrationHandler {
    records: Arc<dyn PhotoRecordStore>,
}

impl RegistrationHandler {
    /// Creates a handler writing to `records`
    #[must_use]
    pub fn new(records: Arc<dyn PhotoRecordStore>) -> Self {
        Self { records }
    }

    /// Registers every created object in `event`, in record order
    ///
    /// Returns the records written. Stops at the first failed write; records written
    /// before it stay in the table.
    ///
    /// # Errors
    ///
    /// Returns the `PhotoRecordStorageError` of the first failed write
    #[instrument(skip_all, fields(records = event.records.len()))]
    pub async fn register(
        &self,
        event: &ObjectCreatedEvent,
    ) -> PhotoRecordStorageResult<Vec<PhotoRecord>> {
        let mut written = Vec::with_capacity(event.records.len());

        for notification in &event.records {
            if !notification.is_object_created() {
                warn!(
                    event_name = %notification.event_name,
                    key = %notification.s3.object.key,
                    "Skipping non-creation event"
                );
                continue;
            }

            let record = PhotoRecord::new(notification.object_key());
            self.records.put(&record).await?;

            info!(id = %record.id, key = %record.key, "Registered photo");
            written.push(record);
        }

        Ok(written)
    }
}
