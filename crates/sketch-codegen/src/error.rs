//! Error types for code generation.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur around analysis and code generation.
///
/// Classification itself never fails; these cover configuration, caller
/// cancellation, input decoding and template rendering.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Analyzer configuration is inconsistent.
    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfig(String),

    /// The caller cancelled the run; partial results were discarded.
    #[error("Analysis cancelled after {processed} of {total} top-level nodes")]
    Cancelled { processed: usize, total: usize },

    /// Scene input could not be read.
    #[error("Scene error: {0}")]
    Scene(#[from] sketch_core::CoreError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
