// Not every utils is used in every test, so we allow dead code
#![allow(dead_code)]

use std::sync::Arc;

use photo_storage::{
    events::{ObjectCreatedEvent, S3EventRecord},
    memory::{InMemoryEventQueue, InMemoryPhotoRecords},
};
use register_worker::{consumer::PhotoEventConsumer, registration::RegistrationHandler};
use tokio_util::sync::CancellationToken;

pub const TEST_BUCKET: &str = "photography-photo-bucket";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Consumer wired to in-memory queue and table
pub struct TestContext {
    pub queue: Arc<InMemoryEventQueue>,
    pub records: Arc<InMemoryPhotoRecords>,
    pub shutdown: CancellationToken,
}

impl TestContext {
    pub fn new() -> Self {
        setup_test_env();

        Self {
            queue: Arc::new(InMemoryEventQueue::new()),
            records: Arc::new(InMemoryPhotoRecords::new()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn registration(&self) -> RegistrationHandler {
        RegistrationHandler::new(self.records.clone())
    }

    pub fn consumer(&self) -> PhotoEventConsumer {
        PhotoEventConsumer::new(
            self.queue.clone(),
            self.registration(),
            self.shutdown.clone(),
        )
    }

    /// Sorted keys of every stored record
    pub fn stored_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self
            .records
            .records()
            .into_iter()
            .map(|record| record.key)
            .collect();
        keys.sort();
        keys
    }
}

/// Notification batch for raw (still URL-encoded) keys
pub fn created_event(keys: &[&str]) -> ObjectCreatedEvent {
    ObjectCreatedEvent::for_keys(TEST_BUCKET, keys.iter().copied())
}

/// Notification record with an arbitrary event name
pub fn event_record(event_name: &str, key: &str) -> S3EventRecord {
    let mut record = S3EventRecord::object_created(TEST_BUCKET, key);
    record.event_name = event_name.to_string();
    record
}
