//! Error types for the media renamer.

use crate::models::media::MediaType;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media renamer.
///
/// Bad input data is never an error: unparseable filenames come back as
/// `MediaType::Unknown` with zero confidence, oversized episode ranges
/// degrade to a single number, and unmatched segments map to `None`.
/// The variants here cover caller contract violations and environment
/// failures only.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Formatter errors
    #[error("Cannot format {media_type} name: missing required field '{field}'")]
    TemplateField {
        media_type: MediaType,
        field: &'static str,
    },

    // LLM errors
    #[error("LLM suggestion failed: {0}")]
    LlmResponse(String),

    // Metadata provider errors
    #[error("Metadata search failed: {0}")]
    MetadataSearch(String),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
