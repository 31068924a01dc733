//! Database abstraction traits
//!
//! This module defines the trait a destination store implements to receive
//! masked login rows.

use crate::domain::{MaskedRecord, Result};
use async_trait::async_trait;

/// Result of appending one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendResult {
    /// Rows written (or that would have been written, in dry-run)
    pub rows_written: usize,

    /// True if the write was skipped because of dry-run
    pub dry_run: bool,
}

/// Destination for masked login rows
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the destination table exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created or accessed.
    async fn ensure_table_exists(&self) -> Result<()>;

    /// Append all rows of one batch
    ///
    /// Either every row is written or none is.
    ///
    /// # Arguments
    ///
    /// * `records` - Rows in output column order
    /// * `dry_run` - If true, skip actual database writes
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing from the batch is kept.
    async fn append_records(&self, records: &[MaskedRecord], dry_run: bool) -> Result<AppendResult>;

    /// Destination table name
    fn table_name(&self) -> &str;
}
