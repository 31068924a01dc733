//! Amazon SQS integration
//!
//! Implements [`MessageQueue`](crate::adapters::queue::MessageQueue) with `aws-sdk-sqs`.

pub mod client;

pub use client::SqsQueue;
