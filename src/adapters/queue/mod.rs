//! Queue abstraction and the drain loop
//!
//! [`MessageQueue`] is implemented by the SQS adapter in production and by
//! in-memory queues in tests. [`QueueDrainer`] turns a queue into a batch of
//! [`RawRecord`](crate::domain::RawRecord)s and acknowledges it once stored.

pub mod drain;
pub mod traits;

pub use drain::{Acknowledgement, DrainedBatch, QueueDrainer};
pub use traits::{MessageQueue, QueueMessage};
