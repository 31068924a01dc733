//! Audit logger for masking runs
//!
//! One JSON line per masked batch. Entries carry counters only; neither raw nor
//! masked identifier values are ever written.

use crate::masking::config::{AuditConfig, NullPolicy};
use crate::masking::engine::FieldMaskStats;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    batch_id: String,
    records: usize,
    null_policy: NullPolicy,
    fields: &'a [FieldMaskStats],
}

/// Audit logger for masking runs
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self { log_path, enabled })
    }

    /// Create a logger from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.enabled)
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one masked batch, returning the generated batch id
    pub fn log_batch(
        &self,
        records: usize,
        null_policy: NullPolicy,
        fields: &[FieldMaskStats],
    ) -> Result<Option<Uuid>> {
        if !self.enabled {
            return Ok(None);
        }

        let batch_id = Uuid::new_v4();
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            batch_id: batch_id.to_string(),
            records,
            null_policy,
            fields,
        };

        self.write_entry(&entry)?;
        Ok(Some(batch_id))
    }

    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        let json_line = serde_json::to_string(entry).context("Failed to serialize audit entry")?;
        writeln!(file, "{json_line}").context("Failed to write audit entry")?;

        Ok(())
    }
}
