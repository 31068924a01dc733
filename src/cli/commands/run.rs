//! Run command implementation
//!
//! This module implements the `run` command: drain the login queue, mask
//! `device_id` and `ip`, and append the batch to PostgreSQL.

use crate::config::{load_config, MaskloadConfig};
use crate::core::pipeline::{PipelineCoordinator, RunSummary};
use crate::domain::MaskloadError;
use crate::masking::NullPolicy;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - receive and mask without writing rows or deleting messages
    #[arg(long)]
    pub dry_run: bool,

    /// Override the maximum number of messages taken in one run
    #[arg(long, value_name = "N")]
    pub max_batch_size: Option<usize>,

    /// Seed mask generators for reproducible output (not allowed in production)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Override null identifier handling (reject or pass_through)
    #[arg(long, value_name = "POLICY")]
    pub null_policy: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Err(message) = self.apply_overrides(&mut config) {
            tracing::error!(error = %message, "Invalid command line override");
            eprintln!("{message}");
            return Ok(2);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written, no messages deleted");
            println!("🔍 DRY RUN MODE - No rows written, no messages deleted from the queue");
            println!();
        }

        if !self.yes && !config.application.dry_run && !confirm(&config)? {
            println!("Run cancelled.");
            return Ok(0);
        }

        tracing::info!("Creating pipeline coordinator");
        let coordinator = match PipelineCoordinator::new(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create pipeline coordinator");
                eprintln!("Failed to initialize run: {e}");
                return Ok(4);
            }
        };

        println!("🚀 Draining queue...");
        println!();

        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(e @ MaskloadError::Queue(_)) | Err(e @ MaskloadError::Database(_)) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(4);
            }
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
        };

        summary.log_summary();
        print_summary(&summary);

        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut MaskloadConfig) -> Result<(), String> {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(size) = self.max_batch_size {
            tracing::info!(max_batch_size = size, "Overriding batch size from CLI");
            config.queue.max_batch_size = size;
        }

        if let Some(seed) = self.seed {
            tracing::info!("Seeding mask generators from CLI");
            config.masking.seed = Some(seed);
        }

        if let Some(policy) = &self.null_policy {
            let policy: NullPolicy = policy.parse().map_err(|e| format!("{e}"))?;
            tracing::info!(null_policy = %policy, "Overriding null policy from CLI");
            config.masking.null_policy = policy;
        }

        Ok(())
    }
}

fn confirm(config: &MaskloadConfig) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Run Configuration:");
    println!("  Queue: {}", config.queue.queue_url);
    println!("  Table: {}", config.postgresql.table);
    println!("  Max batch size: {}", config.queue.max_batch_size);
    println!("  Null policy: {}", config.masking.null_policy);
    println!();
    print!("Drain the queue and load the batch? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Run Summary:");
    println!("  Received: {}", summary.received);
    println!("  Captured: {}", summary.captured);
    println!("  Rejected: {}", summary.rejected);
    println!("  Masked: {}", summary.masked);
    if summary.dry_run {
        println!("  Loaded: 0 (dry run, messages left on the queue)");
    } else {
        println!("  Loaded: {}", summary.loaded);
        println!("  Acknowledged: {}", summary.acknowledged);
    }
    for field in &summary.fields {
        println!(
            "  {}: {} distinct, {} repeated, {} null",
            field.field, field.distinct_values, field.duplicated_values, field.null_values
        );
    }
    if let Some(batch_id) = summary.audit_batch_id {
        println!("  Audit batch: {batch_id}");
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
        }
        println!();
    }
}

/// Exit code for a completed run
///
/// 130 when interrupted, 1 when messages were left on the queue or a
/// non-fatal error was recorded, 0 otherwise.
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.interrupted {
        println!("⚠️  Run interrupted. Captured records were processed; the rest stay queued.");
        130
    } else if !summary.is_successful() || summary.has_rejections() {
        println!("⚠️  Run completed with rejected messages or errors");
        1
    } else {
        println!("✅ Run completed successfully!");
        0
    }
}
