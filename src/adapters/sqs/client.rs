//! SQS client implementation
//!
//! Works against AWS or any SQS-compatible endpoint such as LocalStack.

use crate::adapters::queue::{MessageQueue, QueueMessage};
use crate::config::QueueConfig;
use crate::domain::{MaskloadError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::{Credentials, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{Message, MessageSystemAttributeName};
use aws_sdk_sqs::Client;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;

/// SQS-backed [`MessageQueue`]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
    wait_time_seconds: i32,
}

impl SqsQueue {
    /// Create a new SQS client
    ///
    /// Static credentials are used when both `access_key_id` and
    /// `secret_access_key` are configured; otherwise the default AWS
    /// credential chain applies.
    pub async fn new(config: &QueueConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key.expose_secret().as_ref(),
                None,
                None,
                "maskload",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        tracing::debug!(
            queue_url = %config.queue_url,
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "SQS client created"
        );

        Ok(Self {
            client: Client::new(&sdk_config),
            queue_url: config.queue_url.clone(),
            wait_time_seconds: config.wait_time_seconds,
        })
    }

    /// Check that the queue exists and is reachable
    pub async fn test_connection(&self) -> Result<()> {
        self.client
            .get_queue_attributes()
            .queue_url(&self.queue_url)
            .send()
            .await
            .map_err(|e| {
                MaskloadError::Queue(format!(
                    "Queue {} is not reachable: {}",
                    self.queue_url,
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::info!(queue_url = %self.queue_url, "SQS connection test successful");
        Ok(())
    }

    fn into_queue_message(message: Message, received_at: DateTime<Utc>) -> Result<QueueMessage> {
        let receipt_handle = message
            .receipt_handle()
            .ok_or_else(|| MaskloadError::Queue("Received message without a receipt handle".to_string()))?
            .to_string();

        let sent_at = message
            .attributes()
            .and_then(|attrs| attrs.get(&MessageSystemAttributeName::SentTimestamp))
            .and_then(|millis| parse_sent_timestamp(millis));

        Ok(QueueMessage {
            message_id: message.message_id().unwrap_or_default().to_string(),
            receipt_handle,
            body: message.body().unwrap_or_default().to_string(),
            sent_at,
            received_at,
        })
    }
}

/// Parse the `SentTimestamp` attribute (epoch milliseconds)
fn parse_sent_timestamp(millis: &str) -> Option<DateTime<Utc>> {
    millis
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn receive(&self) -> Result<Option<QueueMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .message_system_attribute_names(MessageSystemAttributeName::SentTimestamp)
            .wait_time_seconds(self.wait_time_seconds)
            .send()
            .await
            .map_err(|e| {
                MaskloadError::Queue(format!(
                    "Failed to receive from {}: {}",
                    self.queue_url,
                    DisplayErrorContext(&e)
                ))
            })?;

        let received_at = Utc::now();

        match output.messages.unwrap_or_default().into_iter().next() {
            Some(message) => Self::into_queue_message(message, received_at).map(Some),
            None => Ok(None),
        }
    }

    async fn acknowledge(&self, message: &QueueMessage) -> Result<()> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(&message.receipt_handle)
            .send()
            .await
            .map_err(|e| {
                MaskloadError::Queue(format!(
                    "Failed to delete message {}: {}",
                    message.message_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::trace!(message_id = %message.message_id, "Message acknowledged");
        Ok(())
    }

    fn queue_url(&self) -> &str {
        &self.queue_url
    }
}
