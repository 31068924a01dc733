//! External system integrations for Maskload.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`queue`] - Queue abstraction and the drain loop (trait-based)
//! - [`sqs`] - Amazon SQS implementation (works against LocalStack)
//! - [`database`] - Destination abstraction layer (trait-based)
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Both ends of the pipeline sit behind traits so the coordinator can be
//! driven by in-memory implementations in tests.
//!
//! # SQS Adapter
//!
//! ```rust,no_run
//! use maskload::adapters::queue::{MessageQueue, QueueDrainer};
//! use maskload::adapters::sqs::SqsQueue;
//! use maskload::config::load_config;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("maskload.toml")?;
//! let queue: Arc<dyn MessageQueue> = Arc::new(SqsQueue::new(&config.queue).await?);
//!
//! let (_tx, shutdown) = tokio::sync::watch::channel(false);
//! let batch = QueueDrainer::new(queue, config.queue.max_batch_size)
//!     .drain(&shutdown)
//!     .await?;
//! println!("Captured {} records", batch.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! # PostgreSQL Adapter
//!
//! ```rust,no_run
//! use maskload::adapters::database::RecordSink;
//! use maskload::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
//! use maskload::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("maskload.toml")?;
//! let client = PostgreSQLClient::new(config.postgresql).await?;
//! let sink = PostgreSQLAdapter::new(client)?;
//!
//! sink.ensure_table_exists().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
pub mod queue;
pub mod sqs;
