//! Run summary and reporting

use crate::masking::FieldMaskStats;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Summary of one drain, mask and load run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Messages taken off the queue
    pub received: usize,

    /// Records accepted into the batch
    pub captured: usize,

    /// Messages left on the queue because they could not be captured
    pub rejected: usize,

    /// Rows masked, whether or not they were written
    pub masked: usize,

    /// Rows written to the destination table, zero in dry-run
    pub loaded: usize,

    /// Messages deleted from the queue after their rows were written
    pub acknowledged: usize,

    /// Per-field masking counters
    pub fields: Vec<FieldMaskStats>,

    /// Audit batch id, when audit logging is enabled
    pub audit_batch_id: Option<Uuid>,

    /// Wall-clock duration of the run
    #[serde(with = "duration_millis")]
    pub duration: Duration,

    /// Writes were skipped
    pub dry_run: bool,

    /// Draining stopped early on a shutdown signal
    pub interrupted: bool,

    /// Errors encountered during the run
    pub errors: Vec<RunError>,
}

impl RunSummary {
    /// Create a new empty summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            received: 0,
            captured: 0,
            rejected: 0,
            masked: 0,
            loaded: 0,
            acknowledged: 0,
            fields: Vec::new(),
            audit_batch_id: None,
            duration: Duration::ZERO,
            dry_run,
            interrupted: false,
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: RunError) {
        self.errors.push(error);
    }

    /// True if every captured record was handled and no error occurred
    ///
    /// A run succeeds when each captured record was written and its message
    /// deleted, or, in dry-run, masked. Rejected messages do not count against
    /// success; they stay on the queue.
    pub fn is_successful(&self) -> bool {
        if !self.errors.is_empty() {
            return false;
        }
        if self.dry_run {
            self.masked == self.captured
        } else {
            self.loaded == self.captured && self.acknowledged == self.captured
        }
    }

    /// True if the run succeeded but left messages on the queue
    pub fn has_rejections(&self) -> bool {
        self.rejected > 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            received = self.received,
            captured = self.captured,
            rejected = self.rejected,
            masked = self.masked,
            loaded = self.loaded,
            acknowledged = self.acknowledged,
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis(),
            "Run completed"
        );

        for error in &self.errors {
            tracing::warn!(
                error_type = ?error.error_type,
                message = %error.message,
                "Run error"
            );
        }
    }
}

/// Stage at which a run error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunErrorType {
    /// Receiving from or acknowledging on the queue
    Queue,
    /// Masking the batch
    Masking,
    /// Writing the audit log
    Audit,
    /// Creating or writing the destination table
    Storage,
}

/// Run error with context
#[derive(Debug, Clone, Serialize)]
pub struct RunError {
    /// Type of error
    pub error_type: RunErrorType,

    /// Error message
    pub message: String,
}

impl RunError {
    /// Create a new run error
    pub fn new(error_type: RunErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(duration.as_millis())
    }
}
