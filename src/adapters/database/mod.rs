//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for the load step, so the
//! pipeline can write to PostgreSQL in production and to memory in tests.

pub mod traits;

pub use traits::{AppendResult, RecordSink};
