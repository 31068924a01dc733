//! Run orchestration
//!
//! This module provides the drain, mask and load workflow:
//! - Pipeline coordination
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::PipelineCoordinator;
pub use summary::{RunError, RunErrorType, RunSummary};
