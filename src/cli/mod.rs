//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Maskload using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Maskload - masks login events from SQS into PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "maskload")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "maskload.toml", env = "MASKLOAD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MASKLOAD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drain the queue, mask identifiers and load the batch
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
