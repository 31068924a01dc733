//! Core orchestration for Maskload.
//!
//! # Run Workflow
//!
//! 1. **Prepare**: Ensure the destination table exists
//! 2. **Drain**: Receive messages one at a time until the queue is empty,
//!    acknowledging each after it is captured
//! 3. **Mask**: Replace `device_id` and `ip` with masks that are consistent
//!    within the batch
//! 4. **Audit** (optional): Append per-field counters to the audit log
//! 5. **Load**: Append all rows to the login table in one transaction
//! 6. **Report**: Return a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use maskload::config::load_config;
//! use maskload::core::pipeline::PipelineCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("maskload.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = PipelineCoordinator::new(config, shutdown_rx).await?;
//! let summary = coordinator.execute().await?;
//!
//! println!("Received: {}", summary.received);
//! println!("Loaded: {}", summary.loaded);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
