use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::events::ObjectCreatedEvent;
use crate::photo_record::{
    PhotoRecord, PhotoRecordStorageError, PhotoRecordStorageResult, PhotoRecordStore,
};
use crate::queue::{PhotoEventSource, QueueError, QueueMessage, QueueResult};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Photo record table kept in memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryPhotoRecords {
    records: Mutex<Vec<PhotoRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    /// Number of successful writes still allowed before writes start failing
    writes_before_failure: Mutex<Option<usize>>,
}

impl InMemoryPhotoRecords {
    /// Creates an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records
    #[must_use]
    pub fn records(&self) -> Vec<PhotoRecord> {
        lock(&self.records).clone()
    }

    /// Inserts records directly, bypassing failure injection
    pub fn seed(&self, records: impl IntoIterator<Item = PhotoRecord>) {
        lock(&self.records).extend(records);
    }

    /// Makes every subsequent write fail; `false` also lifts [`Self::fail_writes_after`]
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
        if !fail {
            *lock(&self.writes_before_failure) = None;
        }
    }

    /// Makes every subsequent scan fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Lets `count` more writes succeed, then fails the rest
    pub fn fail_writes_after(&self, count: usize) {
        *lock(&self.writes_before_failure) = Some(count);
    }
}

#[async_trait]
impl PhotoRecordStore for InMemoryPhotoRecords {
    async fn put(&self, record: &PhotoRecord) -> PhotoRecordStorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PhotoRecordStorageError::Unavailable(
                "write rejected".to_string(),
            ));
        }

        if let Some(remaining) = lock(&self.writes_before_failure).as_mut() {
            if *remaining == 0 {
                return Err(PhotoRecordStorageError::Unavailable(
                    "write rejected".to_string(),
                ));
            }
            *remaining -= 1;
        }

        let mut records = lock(&self.records);
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(PhotoRecordStorageError::RecordExists(record.id.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn scan_all(&self) -> PhotoRecordStorageResult<Vec<PhotoRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PhotoRecordStorageError::Unavailable(
                "scan rejected".to_string(),
            ));
        }
        Ok(self.records())
    }
}

/// Queue of photo events kept in memory
///
/// Polling moves messages in flight; acknowledging removes them. Unacknowledged
/// messages can be made visible again with [`InMemoryEventQueue::redeliver`].
#[derive(Debug, Default)]
pub struct InMemoryEventQueue {
    pending: Mutex<VecDeque<QueueMessage<ObjectCreatedEvent>>>,
    /// Polled messages, in the order they were polled
    in_flight: Mutex<Vec<QueueMessage<ObjectCreatedEvent>>>,
    acked: Mutex<Vec<String>>,
    next_id: Mutex<u64>,
}

impl InMemoryEventQueue {
    /// Creates an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an event and returns its message ID
    pub fn push(&self, event: ObjectCreatedEvent) -> String {
        let id = {
            let mut next = lock(&self.next_id);
            *next += 1;
            *next
        };
        let message_id = format!("message-{id}");
        lock(&self.pending).push_back(QueueMessage {
            body: event,
            receipt_handle: format!("receipt-{id}"),
            message_id: message_id.clone(),
        });
        message_id
    }

    /// Message IDs acknowledged so far
    #[must_use]
    pub fn acked(&self) -> Vec<String> {
        lock(&self.acked).clone()
    }

    /// Number of messages polled but not yet acknowledged
    #[must_use]
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }

    /// Number of messages waiting to be polled
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Returns every in-flight message to the queue in poll order, as a visibility
    /// timeout would
    pub fn redeliver(&self) {
        let mut in_flight = lock(&self.in_flight);
        lock(&self.pending).extend(in_flight.drain(..));
    }
}

#[async_trait]
impl PhotoEventSource for InMemoryEventQueue {
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage<ObjectCreatedEvent>>> {
        let messages: Vec<_> = lock(&self.pending).drain(..).collect();
        lock(&self.in_flight).extend(messages.iter().cloned());
        Ok(messages)
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        let message = {
            let mut in_flight = lock(&self.in_flight);
            let position = in_flight
                .iter()
                .position(|message| message.receipt_handle == receipt_handle)
                .ok_or_else(|| QueueError::UnknownReceipt(receipt_handle.to_string()))?;
            in_flight.remove(position)
        };
        lock(&self.acked).push(message.message_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_round_trip_through_memory_table() {
        let table = InMemoryPhotoRecords::new();
        let record = PhotoRecord::new("photos/abc-cat.png");

        table.put(&record).await.unwrap();

        assert_eq!(table.scan_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_fail_writes_after_allows_prefix() {
        let table = InMemoryPhotoRecords::new();
        table.fail_writes_after(1);

        assert!(table.put(&PhotoRecord::new("a")).await.is_ok());
        assert!(table.put(&PhotoRecord::new("b")).await.is_err());
        assert_eq!(table.records().len(), 1);
    }

    #[tokio::test]
    async fn test_queue_ack_and_redeliver() {
        let queue = InMemoryEventQueue::new();
        queue.push(ObjectCreatedEvent::default());
        queue.push(ObjectCreatedEvent::default());

        let messages = queue.poll_messages().await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(queue.in_flight(), 2);

        queue.ack_message(&messages[0].receipt_handle).await.unwrap();
        queue.redeliver();

        assert_eq!(queue.acked(), vec![messages[0].message_id.clone()]);
        assert_eq!(queue.pending(), 1);
        assert!(queue.ack_message("receipt-unknown").await.is_err());
    }

    #[tokio::test]
    async fn test_redeliver_keeps_poll_order() {
        let queue = InMemoryEventQueue::new();
        let pushed: Vec<_> = (0..12)
            .map(|_| queue.push(ObjectCreatedEvent::default()))
            .collect();

        queue.poll_messages().await.unwrap();
        queue.redeliver();

        let redelivered: Vec<_> = queue
            .poll_messages()
            .await
            .unwrap()
            .into_iter()
            .map(|message| message.message_id)
            .collect();
        assert_eq!(redelivered, pushed);
    }
}
