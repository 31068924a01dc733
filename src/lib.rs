// Maskload - SQS login events to PostgreSQL with consistent masking
// Copyright (c) 2026 Maskload Contributors
// Licensed under the MIT License

//! # Maskload - masked login events from SQS to PostgreSQL
//!
//! Maskload drains a queue of user-login events, replaces the personally
//! identifying `device_id` and `ip` values with masks, and appends the batch
//! to a relational table for analytics.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Draining** JSON login messages from SQS, one receive at a time
//! - **Masking** identifiers so that equal raw values within a batch share a
//!   mask and distinct raw values do not
//! - **Loading** the masked rows into PostgreSQL in one transaction
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Run orchestration and summary
//! - [`masking`] - Consistent masking engine, generators and audit log
//! - [`adapters`] - External integrations (SQS, PostgreSQL)
//! - [`domain`] - Records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maskload::config::load_config;
//! use maskload::core::pipeline::PipelineCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("maskload.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = PipelineCoordinator::new(config, shutdown_rx).await?;
//!     let summary = coordinator.execute().await?;
//!
//!     println!("Loaded {} rows", summary.loaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Masking Consistency
//!
//! Masks are consistent within one batch only. Values that occur once get a
//! fresh mask without being remembered; values that repeat go through a
//! table that lives for a single call.
//!
//! ```rust
//! use maskload::domain::RawRecord;
//! use maskload::masking::{mask_field, Ipv4Generator};
//! use serde_json::json;
//!
//! let records: Vec<RawRecord> = ["10.0.0.1", "10.0.0.2", "10.0.0.1"]
//!     .iter()
//!     .map(|ip| RawRecord::from(json!({ "ip": ip }).as_object().unwrap().clone()))
//!     .collect();
//!
//! let masks = mask_field(&records, "ip", &mut Ipv4Generator::seeded(7))?;
//! assert_eq!(masks[0], masks[2]);
//! assert_ne!(masks[0], masks[1]);
//! # Ok::<(), maskload::domain::MaskingError>(())
//! ```
//!
//! ## Error Handling
//!
//! Maskload uses the [`domain::MaskloadError`] type for all errors:
//!
//! ```rust,no_run
//! use maskload::domain::MaskloadError;
//!
//! fn example() -> Result<(), MaskloadError> {
//!     let _config = maskload::config::load_config("maskload.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod masking;
