use std::{sync::Arc, time::Duration};

use anyhow::Context;
use photo_storage::{
    events::ObjectCreatedEvent,
    queue::{PhotoEventSource, QueueMessage},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::registration::RegistrationHandler;

/// Pause after a failed poll before polling again
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Polls the photo events queue and registers every notified photo
pub struct PhotoEventConsumer {
    queue: Arc<dyn PhotoEventSource>,
    registration: RegistrationHandler,
    shutdown: CancellationToken,
}

impl PhotoEventConsumer {
    /// Creates a new `PhotoEventConsumer`
    #[must_use]
    pub fn new(
        queue: Arc<dyn PhotoEventSource>,
        registration: RegistrationHandler,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            queue,
            registration,
            shutdown,
        }
    }

    /// Polls until the shutdown token is cancelled
    pub async fn start(self) {
        info!("Starting PhotoEventConsumer");

        while !self.shutdown.is_cancelled() {
            tokio::select! {
                result = self.poll_once() => {
                    if let Err(e) = result {
                        error!(error = ?e, "Failed to poll messages");
                        tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    }
                },
                () = self.shutdown.cancelled() => {
                    info!("Queue poller shutting down");
                    break;
                }
            }
        }

        info!("PhotoEventConsumer shutdown complete");
    }

    /// Polls one batch and processes every message in it
    ///
    /// A message that fails is logged and left unacknowledged; the rest of the batch is
    /// still processed. Returns the number of messages acknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue could not be polled
    pub async fn poll_once(&self) -> anyhow::Result<usize> {
        let messages = self
            .queue
            .poll_messages()
            .await
            .context("Failed to poll messages")?;

        let mut acked = 0;
        for message in messages {
            let message_id = message.message_id.clone();
            match self.process_and_ack(message).await {
                Ok(()) => acked += 1,
                Err(e) => {
                    // Redelivered once the visibility timeout expires
                    error!(
                        message_id = %message_id,
                        error = ?e,
                        "Failed to process photo event"
                    );
                }
            }
        }

        Ok(acked)
    }

    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn process_and_ack(
        &self,
        message: QueueMessage<ObjectCreatedEvent>,
    ) -> anyhow::Result<()> {
        let registered = self
            .registration
            .register(&message.body)
            .await
            .context("Failed to register photos")?;

        self.queue
            .ack_message(&message.receipt_handle)
            .await
            .context("Failed to acknowledge message")?;

        info!(registered = registered.len(), "Processed photo event");
        Ok(())
    }
}
