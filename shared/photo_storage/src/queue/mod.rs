//! Queue operations for photo creation events
//!
//! S3 delivers `ObjectCreated:*` notifications for the photo bucket to a standard SQS
//! queue. Messages are acknowledged only after they have been processed; anything left
//! unacknowledged is redelivered once its visibility timeout expires.

/// Error types for queue operations
pub mod error;
/// Common types for queue operations
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sqs::{types::Message, Client as SqsClient};

use crate::events::ObjectCreatedEvent;
pub use error::{QueueError, QueueResult};
pub use types::{QueueConfig, QueueMessage};

/// Source of photo creation events
#[async_trait]
pub trait PhotoEventSource: Send + Sync {
    /// Polls the next batch of messages
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the poll operation fails
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage<ObjectCreatedEvent>>>;

    /// Acknowledges a processed message so it is not redelivered
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the acknowledgment fails
    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()>;
}

/// Turns a received SQS message into a photo event
///
/// Returns `None`, after logging why, for messages without a body or receipt handle
/// and for bodies that are not S3 notifications.
#[must_use]
pub fn parse_message(message: &Message) -> Option<QueueMessage<ObjectCreatedEvent>> {
    let message_id = message.message_id().unwrap_or_default();

    let (Some(body), Some(receipt_handle)) = (message.body(), message.receipt_handle()) else {
        tracing::warn!(
            message_id = %message_id,
            "Skipping SQS message without body or receipt handle"
        );
        return None;
    };

    match serde_json::from_str::<ObjectCreatedEvent>(body) {
        Ok(parsed) => {
            tracing::debug!(
                message_id = %message_id,
                records = parsed.records.len(),
                "Received photo event"
            );
            Some(QueueMessage {
                body: parsed,
                receipt_handle: receipt_handle.to_string(),
                message_id: message_id.to_string(),
            })
        }
        Err(e) => {
            tracing::error!(message_id = %message_id, "Failed to deserialize photo event: {}", e);
            None
        }
    }
}

/// SQS queue receiving S3 notifications for the photo bucket
pub struct PhotoEventQueue {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
}

impl PhotoEventQueue {
    /// Creates a new photo event queue
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `config` - Queue configuration including URL and default parameters
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self { sqs_client, config }
    }
}

#[async_trait]
impl PhotoEventSource for PhotoEventQueue {
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage<ObjectCreatedEvent>>> {
        // Receive messages from SQS
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.default_max_messages)
            .visibility_timeout(self.config.default_visibility_timeout)
            .wait_time_seconds(self.config.default_wait_time_seconds)
            .send()
            .await?;

        // Unparseable messages stay on the queue until the redrive policy moves them aside
        let messages = result.messages().iter().filter_map(parse_message).collect();

        Ok(messages)
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }
}
