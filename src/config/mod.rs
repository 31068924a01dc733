//! Configuration management for Maskload.
//!
//! Maskload reads a single TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MASKLOAD_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation of every section before anything connects
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run
//! - [`QueueConfig`] - SQS queue URL, region, endpoint override, credentials
//! - [`PostgreSQLConfig`] - connection string, destination table, pool and TLS
//! - [`MaskingConfig`](crate::masking::MaskingConfig) - null policy, seed, audit log
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [queue]
//! queue_url = "http://localhost:4566/000000000000/login-queue"
//! endpoint_url = "http://localhost:4566"
//!
//! [postgresql]
//! connection_string = "${MASKLOAD_PG_URL}"
//! table = "user_logins"
//!
//! [masking]
//! null_policy = "reject"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use maskload::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("maskload.toml")?;
//! println!("Loading into {}", config.postgresql.table);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, Environment, LoggingConfig, MaskloadConfig, PostgreSQLConfig, QueueConfig,
};
pub use secret::{
    redact_connection_string, secret_string, secret_string_opt, SecretString, SecretValue,
};
