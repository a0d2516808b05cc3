//! Error types for reading canvas scenes.

use thiserror::Error;

/// Result type alias for scene reading.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while reading canvas input.
///
/// Only whole-document decoding can fail. Individual malformed objects are
/// defaulted by the reader instead of producing an error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid color format: {value}")]
    InvalidColor { value: String },

    #[cfg(feature = "serde")]
    #[error("Invalid canvas document: {0}")]
    Json(#[from] serde_json::Error),
}
