//! Pipeline coordinator - drives one drain, mask and load run
//!
//! The run is strictly sequential: the whole queue is drained into memory,
//! masked as one batch so that masks are consistent across it, and appended
//! to the destination table in a single write. Messages are deleted only
//! after that write commits.

use crate::adapters::database::traits::RecordSink;
use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::adapters::queue::{MessageQueue, QueueDrainer};
use crate::adapters::sqs::SqsQueue;
use crate::config::MaskloadConfig;
use crate::core::pipeline::summary::{RunError, RunErrorType, RunSummary};
use crate::domain::{MaskloadError, Result};
use crate::masking::{AuditLogger, BatchMasker};
use crate::{log_batch_drained, log_error_with_context, log_field_masked, log_load_complete};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Pipeline coordinator
pub struct PipelineCoordinator {
    config: MaskloadConfig,
    queue: Arc<dyn MessageQueue>,
    sink: Arc<dyn RecordSink>,
    shutdown: watch::Receiver<bool>,
}

impl PipelineCoordinator {
    /// Create a coordinator backed by SQS and PostgreSQL
    ///
    /// Both endpoints are contacted once, so unreachable services fail here
    /// rather than mid-run.
    pub async fn new(config: MaskloadConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let queue = Arc::new(SqsQueue::new(&config.queue).await?);
        queue.test_connection().await?;

        let client = PostgreSQLClient::new(config.postgresql.clone()).await?;
        let sink = Arc::new(PostgreSQLAdapter::new(client)?);
        sink.test_connection().await?;

        tracing::debug!(
            queue = %queue.queue_url(),
            table = %sink.table_name(),
            "Pipeline components created"
        );

        Ok(Self::with_components(config, queue, sink, shutdown))
    }

    /// Create a coordinator over existing queue and sink implementations
    pub fn with_components(
        config: MaskloadConfig,
        queue: Arc<dyn MessageQueue>,
        sink: Arc<dyn RecordSink>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            queue,
            sink,
            shutdown,
        }
    }

    /// Execute one run
    ///
    /// 1. Ensures the destination table exists (skipped in dry-run)
    /// 2. Drains the queue into one batch, leaving every message queued
    /// 3. Masks `device_id` and `ip` consistently across the batch
    /// 4. Writes the audit entry
    /// 5. Appends the masked rows
    /// 6. Acknowledges the batch's messages (skipped in dry-run)
    ///
    /// Messages are only deleted after the append has committed, so a run that
    /// fails at any earlier step leaves the whole batch for redelivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be prepared, the first receive
    /// fails, the batch fails masking, or the append fails.
    pub async fn execute(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let dry_run = self.config.application.dry_run;
        let mut summary = RunSummary::new(dry_run);

        tracing::info!(dry_run, "Starting run");

        if !dry_run {
            self.sink.ensure_table_exists().await?;
        }

        let drainer = QueueDrainer::new(self.queue.clone(), self.config.queue.max_batch_size)
            .with_null_policy(self.config.masking.null_policy);
        let drained = drainer.drain(&self.shutdown).await?;

        summary.received = drained.received();
        summary.captured = drained.captured();
        summary.rejected = drained.rejected;
        summary.interrupted = drained.interrupted;
        log_batch_drained!(summary.received, summary.captured, summary.rejected);

        if let Some(message) = &drained.receive_error {
            summary.add_error(RunError::new(RunErrorType::Queue, message.clone()));
        }

        if drained.records.is_empty() {
            tracing::info!("No records captured, nothing to load");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let masker = BatchMasker::new(&self.config.masking);
        let masked = masker.mask(&drained.records).map_err(|e| {
            log_error_with_context!(&e, "Masking failed, batch left on the queue");
            MaskloadError::Masking(e)
        })?;
        summary.masked = masked.records.len();

        let stats = masked.field_stats();
        for field in &stats {
            log_field_masked!(field);
        }

        match AuditLogger::from_config(&self.config.masking.audit).and_then(|logger| {
            logger.log_batch(masked.records.len(), masker.null_policy(), &stats)
        }) {
            Ok(batch_id) => summary.audit_batch_id = batch_id,
            Err(e) => {
                log_error_with_context!(&e, "Failed to write masking audit entry");
                summary.add_error(RunError::new(RunErrorType::Audit, e.to_string()));
            }
        }
        summary.fields = stats.to_vec();

        let load_start = Instant::now();
        let result = self
            .sink
            .append_records(&masked.records, dry_run)
            .await
            .map_err(|e| {
                log_error_with_context!(&e, "Load failed, batch rolled back and left on the queue");
                e
            })?;

        if result.dry_run {
            tracing::info!(
                rows = result.rows_written,
                "DRY RUN: batch masked, messages left on the queue"
            );
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        summary.loaded = result.rows_written;
        log_load_complete!(
            result.rows_written,
            self.sink.table_name(),
            load_start.elapsed()
        );

        let ack = drainer.acknowledge(&drained.messages).await;
        summary.acknowledged = ack.acknowledged;
        if !ack.failed.is_empty() {
            summary.add_error(RunError::new(
                RunErrorType::Queue,
                format!(
                    "{} stored messages could not be acknowledged and will be redelivered: {}",
                    ack.failed.len(),
                    ack.failed.join(", ")
                ),
            ));
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }
}
