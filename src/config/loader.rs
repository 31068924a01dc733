//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MaskloadConfig;
use super::secret::{secret_string, secret_string_opt};
use crate::domain::errors::MaskloadError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`MaskloadConfig`]
/// 4. Applies environment variable overrides (`MASKLOAD_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`MaskloadError::Configuration`] if any of those steps fails.
///
/// # Examples
///
/// ```no_run
/// use maskload::config::load_config;
///
/// let config = load_config("maskload.toml").expect("Failed to load config");
/// println!("draining {}", config.queue.queue_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MaskloadConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MaskloadError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MaskloadError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Runs the same substitution, override and validation steps as [`load_config`].
pub fn parse_config(contents: &str) -> Result<MaskloadConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MaskloadConfig = toml::from_str(&contents)
        .map_err(|e| MaskloadError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MaskloadError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MaskloadError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MaskloadError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(val) => val.parse().map(Some).map_err(|e| {
            MaskloadError::Configuration(format!("Invalid {name} value '{val}': {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using the `MASKLOAD_*` prefix
///
/// Variables follow the pattern `MASKLOAD_<SECTION>_<KEY>`, for example
/// `MASKLOAD_QUEUE_QUEUE_URL` or `MASKLOAD_POSTGRESQL_TABLE`.
fn apply_env_overrides(config: &mut MaskloadConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MASKLOAD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(dry_run) = env_parse("MASKLOAD_APPLICATION_DRY_RUN")? {
        config.application.dry_run = dry_run;
    }

    // Queue overrides
    if let Ok(val) = std::env::var("MASKLOAD_QUEUE_QUEUE_URL") {
        config.queue.queue_url = val;
    }
    if let Ok(val) = std::env::var("MASKLOAD_QUEUE_REGION") {
        config.queue.region = val;
    }
    if let Ok(val) = std::env::var("MASKLOAD_QUEUE_ENDPOINT_URL") {
        config.queue.endpoint_url = Some(val).filter(|v| !v.is_empty());
    }
    if let Ok(val) = std::env::var("MASKLOAD_QUEUE_ACCESS_KEY_ID") {
        config.queue.access_key_id = Some(val);
    }
    if let Ok(val) = std::env::var("MASKLOAD_QUEUE_SECRET_ACCESS_KEY") {
        config.queue.secret_access_key = secret_string_opt(Some(val));
    }
    if let Some(wait) = env_parse("MASKLOAD_QUEUE_WAIT_TIME_SECONDS")? {
        config.queue.wait_time_seconds = wait;
    }
    if let Some(size) = env_parse("MASKLOAD_QUEUE_MAX_BATCH_SIZE")? {
        config.queue.max_batch_size = size;
    }

    // PostgreSQL overrides
    if let Ok(val) = std::env::var("MASKLOAD_POSTGRESQL_CONNECTION_STRING") {
        config.postgresql.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("MASKLOAD_POSTGRESQL_TABLE") {
        config.postgresql.table = val;
    }
    if let Some(create) = env_parse("MASKLOAD_POSTGRESQL_CREATE_TABLE")? {
        config.postgresql.create_table = create;
    }
    if let Some(max) = env_parse("MASKLOAD_POSTGRESQL_MAX_CONNECTIONS")? {
        config.postgresql.max_connections = max;
    }
    if let Ok(val) = std::env::var("MASKLOAD_POSTGRESQL_SSL_MODE") {
        config.postgresql.ssl_mode = val;
    }

    // Masking overrides
    config
        .masking
        .apply_env_overrides()
        .map_err(|e| MaskloadError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Some(enabled) = env_parse("MASKLOAD_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("MASKLOAD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MASKLOAD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
