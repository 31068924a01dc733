//! Message queue abstraction
//!
//! The drain loop only needs two operations from a queue: take at most one
//! message, and delete a message once its record has been stored.

use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One message taken from the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    /// Broker-assigned message id
    pub message_id: String,

    /// Handle used to acknowledge (delete) this delivery
    pub receipt_handle: String,

    /// Raw body, expected to be a JSON object
    pub body: String,

    /// When the producer sent the message, if the broker reports it
    pub sent_at: Option<DateTime<Utc>>,

    /// When this process received the message
    pub received_at: DateTime<Utc>,
}

impl QueueMessage {
    /// Timestamp recorded as the row's `create_date`
    ///
    /// The sent time when known, otherwise the receipt time.
    pub fn ingested_at(&self) -> DateTime<Utc> {
        self.sent_at.unwrap_or(self.received_at)
    }
}

/// Source of login messages
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Receive at most one message
    ///
    /// Returns `Ok(None)` when the queue reports no messages available.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker call fails.
    async fn receive(&self) -> Result<Option<QueueMessage>>;

    /// Delete a received message so it is not redelivered
    ///
    /// # Errors
    ///
    /// Returns an error if the broker call fails.
    async fn acknowledge(&self, message: &QueueMessage) -> Result<()>;

    /// Queue identifier for logs
    fn queue_url(&self) -> &str;
}
