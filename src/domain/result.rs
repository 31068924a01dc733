//! Result type alias for Maskload

use super::errors::MaskloadError;

/// Result type alias for Maskload operations
///
/// # Examples
///
/// ```
/// use maskload::domain::result::Result;
/// use maskload::domain::errors::MaskloadError;
///
/// fn failing_function() -> Result<()> {
///     Err(MaskloadError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MaskloadError>;
