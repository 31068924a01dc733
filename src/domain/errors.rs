//! Domain error types
//!
//! This module defines the error hierarchy for Maskload. Adapter errors are flattened
//! into strings so that AWS SDK and PostgreSQL driver types never leak past the
//! adapter boundary. Masking errors stay structured so callers can see which field
//! and which record position failed.

use thiserror::Error;

/// Main Maskload error type
#[derive(Debug, Error)]
pub enum MaskloadError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Message queue errors (receive, acknowledge, decode)
    #[error("Queue error: {0}")]
    Queue(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Masking engine errors
    #[error("Masking error: {0}")]
    Masking(#[from] MaskingError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while masking one field over a batch
///
/// Every variant names the field and, where it applies, the zero-based record
/// position inside the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskingError {
    /// The record has no value under the field
    #[error("record {position}: field '{field}' is missing")]
    MissingField { field: String, position: usize },

    /// The value cannot be used as a raw identifier
    #[error("record {position}: field '{field}' has an invalid value: {reason}")]
    InvalidValue {
        field: String,
        position: usize,
        reason: String,
    },

    /// The value is null-like and the null policy rejects it
    #[error("record {position}: field '{field}' is null")]
    NullValue { field: String, position: usize },

    /// The generator could not produce a masked value
    #[error("generator failed while masking field '{field}': {source}")]
    Generator {
        field: String,
        #[source]
        source: GeneratorError,
    },
}

impl MaskingError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidValue { field, .. }
            | Self::NullValue { field, .. }
            | Self::Generator { field, .. } => field,
        }
    }

    /// Record position, when the error is tied to a single record
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MissingField { position, .. }
            | Self::InvalidValue { position, .. }
            | Self::NullValue { position, .. } => Some(*position),
            Self::Generator { .. } => None,
        }
    }
}

/// Failure of a masked-value generator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The underlying random source failed
    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// The generator produced a value that does not match its declared shape
    #[error("generated value does not match {kind} shape: {value}")]
    Malformed { kind: &'static str, value: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for MaskloadError {
    fn from(err: std::io::Error) -> Self {
        MaskloadError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MaskloadError {
    fn from(err: serde_json::Error) -> Self {
        MaskloadError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MaskloadError {
    fn from(err: toml::de::Error) -> Self {
        MaskloadError::Configuration(format!("TOML parse error: {err}"))
    }
}
