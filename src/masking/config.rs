//! Masking configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do with a null-like identifying value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Fail the batch, naming the field and record position
    Reject,
    /// Store NULL for that record; nulls never share a mask
    PassThrough,
}

impl Default for NullPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

impl std::fmt::Display for NullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::PassThrough => write!(f, "pass_through"),
        }
    }
}

impl std::str::FromStr for NullPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            _ => anyhow::bail!("Invalid null policy: {s}"),
        }
    }
}

/// Masking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Handling of null-like device_id / ip values
    #[serde(default)]
    pub null_policy: NullPolicy,

    /// Fixed seed for reproducible masks; unset draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl MaskingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.audit.validate().context("Invalid audit configuration")?;
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MASKLOAD_MASKING_NULL_POLICY") {
            self.null_policy = val
                .parse()
                .context("Invalid MASKLOAD_MASKING_NULL_POLICY value")?;
        }

        if let Ok(val) = std::env::var("MASKLOAD_MASKING_SEED") {
            self.seed = Some(val.parse().context("Invalid MASKLOAD_MASKING_SEED value")?);
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/masking.log")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("Audit log path cannot be empty when audit logging is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MASKLOAD_MASKING_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid MASKLOAD_MASKING_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("MASKLOAD_MASKING_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}
