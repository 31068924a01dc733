//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Console output
//! - Configurable log levels, overridable by `RUST_LOG`
//! - JSON log files with rotation
//!
//! Raw identifier values are never logged; only counts and field names.
//!
//! # Example
//!
//! ```no_run
//! use maskload::logging::init_logging;
//! use maskload::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of draining the queue
///
/// # Example
///
/// ```no_run
/// use maskload::log_batch_drained;
///
/// log_batch_drained!(120, 118, 2);
/// ```
#[macro_export]
macro_rules! log_batch_drained {
    ($received:expr, $captured:expr, $rejected:expr) => {
        tracing::info!(
            received = $received,
            captured = $captured,
            rejected = $rejected,
            "Queue drained"
        );
    };
}

/// Log the counters of one masked field
///
/// # Example
///
/// ```no_run
/// use maskload::log_field_masked;
/// use maskload::masking::{BatchMasker, MaskingConfig};
///
/// let batch = BatchMasker::new(&MaskingConfig::default()).mask(&[]).unwrap();
/// log_field_masked!(&batch.device_id);
/// ```
#[macro_export]
macro_rules! log_field_masked {
    ($stats:expr) => {
        tracing::info!(
            field = %$stats.field,
            kind = %$stats.kind,
            records = $stats.records,
            distinct = $stats.distinct_values,
            duplicated = $stats.duplicated_values,
            nulls = $stats.null_values,
            "Field masked"
        );
    };
}

/// Log the completion of a load
///
/// # Example
///
/// ```no_run
/// use maskload::log_load_complete;
/// use std::time::Duration;
///
/// log_load_complete!(42, "user_logins", Duration::from_millis(150));
/// ```
#[macro_export]
macro_rules! log_load_complete {
    ($count:expr, $table:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            table = %$table,
            duration_ms = $duration.as_millis(),
            "Load completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use maskload::log_error_with_context;
/// use maskload::domain::MaskloadError;
///
/// let error = MaskloadError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
