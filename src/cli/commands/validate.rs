//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Maskload configuration file.

use crate::config::{load_config, redact_connection_string, MaskloadConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates, so any failure here is a configuration error
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        for line in summary_lines(&config) {
            println!("  {line}");
        }
        println!();
        Ok(0)
    }
}

/// Human-readable configuration summary with secrets redacted
pub fn summary_lines(config: &MaskloadConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Environment: {:?}", config.environment),
        format!("Log Level: {}", config.application.log_level),
        format!("Dry Run: {}", config.application.dry_run),
        format!("Queue URL: {}", config.queue.queue_url),
        format!("Queue Region: {}", config.queue.region),
    ];

    if let Some(endpoint) = &config.queue.endpoint_url {
        lines.push(format!("Queue Endpoint: {endpoint}"));
    }
    lines.push(format!(
        "Queue Credentials: {}",
        if config.queue.access_key_id.is_some() {
            "static (redacted)"
        } else {
            "default provider chain"
        }
    ));
    lines.push(format!("Max Batch Size: {}", config.queue.max_batch_size));

    lines.push(format!(
        "PostgreSQL Connection: {}",
        redact_connection_string(config.postgresql.connection_string.expose_secret().as_ref())
    ));
    lines.push(format!("PostgreSQL Table: {}", config.postgresql.table));
    lines.push(format!("SSL Mode: {}", config.postgresql.ssl_mode));
    lines.push(format!("Max Connections: {}", config.postgresql.max_connections));

    lines.push(format!("Null Policy: {}", config.masking.null_policy));
    lines.push(format!(
        "Seeded Masks: {}",
        if config.masking.seed.is_some() { "yes" } else { "no" }
    ));
    lines.push(format!(
        "Masking Audit: {}",
        if config.masking.audit.enabled {
            config.masking.audit.log_path.display().to_string()
        } else {
            "disabled".to_string()
        }
    ));

    lines
}
