//! Drains a queue into one batch of raw records
//!
//! Draining never deletes anything. Messages are acknowledged in a separate
//! step, once the caller has stored the batch.

use crate::adapters::queue::traits::{MessageQueue, QueueMessage};
use crate::domain::{RawRecord, Result};
use crate::log_error_with_context;
use crate::masking::{check_record, NullPolicy};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Records captured by one drain
#[derive(Debug, Default)]
pub struct DrainedBatch {
    /// Decoded records, in receive order
    pub records: Vec<RawRecord>,

    /// Deliveries the records came from, aligned with `records`
    pub messages: Vec<QueueMessage>,

    /// Messages left on the queue because they could not be captured
    pub rejected: usize,

    /// Draining stopped because shutdown was signalled
    pub interrupted: bool,

    /// Receive failure that ended the drain after records were captured
    pub receive_error: Option<String>,
}

impl DrainedBatch {
    /// Records accepted into the batch
    pub fn captured(&self) -> usize {
        self.records.len()
    }

    /// Messages taken off the queue, captured or not
    pub fn received(&self) -> usize {
        self.records.len() + self.rejected
    }
}

/// Outcome of acknowledging a stored batch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Messages deleted from the queue
    pub acknowledged: usize,

    /// Ids of messages whose delete failed; they will be redelivered
    pub failed: Vec<String>,
}

/// Pulls messages one at a time until the queue is empty
pub struct QueueDrainer {
    queue: Arc<dyn MessageQueue>,
    max_batch_size: usize,
    null_policy: NullPolicy,
}

impl QueueDrainer {
    /// Create a drainer that stops after `max_batch_size` messages
    pub fn new(queue: Arc<dyn MessageQueue>, max_batch_size: usize) -> Self {
        Self {
            queue,
            max_batch_size,
            null_policy: NullPolicy::default(),
        }
    }

    /// Null policy used to decide whether a record can be masked
    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }

    /// Drain the queue without acknowledging anything
    ///
    /// Stops when the queue reports empty, when `max_batch_size` messages have
    /// been taken, when a message already seen in this drain is delivered
    /// again, or when `shutdown` is set. Each message is decoded, stamped with
    /// `create_date` and checked for maskable `device_id` and `ip` values.
    /// Messages that fail any of these steps are counted as rejected and left
    /// on the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the very first receive fails. A receive failure
    /// after records were captured ends the drain and is reported in
    /// [`DrainedBatch::receive_error`].
    pub async fn drain(&self, shutdown: &watch::Receiver<bool>) -> Result<DrainedBatch> {
        let mut batch = DrainedBatch::default();
        // message id -> index into `batch.messages`, None for rejected
        let mut seen: HashMap<String, Option<usize>> = HashMap::new();

        tracing::info!(
            queue = %self.queue.queue_url(),
            max_batch_size = self.max_batch_size,
            null_policy = %self.null_policy,
            "Draining queue"
        );

        while batch.received() < self.max_batch_size {
            if *shutdown.borrow() {
                tracing::warn!(
                    captured = batch.captured(),
                    "Shutdown requested, stopping drain"
                );
                batch.interrupted = true;
                break;
            }

            let message = match self.queue.receive().await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(e) if batch.records.is_empty() => return Err(e),
                Err(e) => {
                    log_error_with_context!(&e, "Receive failed mid-drain; keeping captured records");
                    batch.receive_error = Some(e.to_string());
                    break;
                }
            };

            if let Some(previous) = seen.get(&message.message_id) {
                // Only the newest receipt handle can delete a redelivered message
                if let Some(index) = *previous {
                    batch.messages[index].receipt_handle = message.receipt_handle.clone();
                }
                tracing::info!(
                    message_id = %message.message_id,
                    "Message delivered twice; the queue has wrapped, stopping drain"
                );
                break;
            }

            let position = batch.received();
            let checked = RawRecord::from_message_body(&message.body, message.ingested_at())
                .and_then(|record| {
                    check_record(&record, position, self.null_policy)?;
                    Ok(record)
                });

            match checked {
                Ok(record) => {
                    seen.insert(message.message_id.clone(), Some(batch.messages.len()));
                    batch.records.push(record);
                    batch.messages.push(message);
                }
                Err(e) => {
                    tracing::warn!(
                        message_id = %message.message_id,
                        error = %e,
                        "Rejected message; leaving it on the queue"
                    );
                    seen.insert(message.message_id, None);
                    batch.rejected += 1;
                }
            }
        }

        if batch.received() >= self.max_batch_size {
            tracing::info!(
                max_batch_size = self.max_batch_size,
                "Batch size limit reached; remaining messages stay queued"
            );
        }

        Ok(batch)
    }

    /// Delete every message of a stored batch
    ///
    /// Failures are logged and collected; the remaining messages are still
    /// acknowledged.
    pub async fn acknowledge(&self, messages: &[QueueMessage]) -> Acknowledgement {
        let mut outcome = Acknowledgement::default();

        for message in messages {
            match self.queue.acknowledge(message).await {
                Ok(()) => outcome.acknowledged += 1,
                Err(e) => {
                    tracing::warn!(
                        message_id = %message.message_id,
                        error = %e,
                        "Failed to acknowledge stored message; it will be redelivered"
                    );
                    outcome.failed.push(message.message_id.clone());
                }
            }
        }

        tracing::debug!(
            acknowledged = outcome.acknowledged,
            failed = outcome.failed.len(),
            "Batch acknowledged"
        );

        outcome
    }
}
