//! Domain models and types for Maskload.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`RawRecord`], [`MaskedRecord`]) and the login field names
//! - **Error types** ([`MaskloadError`], [`MaskingError`], [`GeneratorError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations outside the masking engine return [`Result<T>`]. Masking
//! errors convert into [`MaskloadError::Masking`] with the `?` operator:
//!
//! ```rust
//! use maskload::domain::{MaskingError, Result};
//!
//! fn example() -> Result<()> {
//!     let failure: std::result::Result<(), MaskingError> = Ok(());
//!     failure?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{GeneratorError, MaskingError, MaskloadError};
pub use record::{fields, is_null_like, MaskedRecord, RawRecord};
pub use result::Result;
