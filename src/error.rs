//! Error types for hwpxprep library.
//!
//! The normalization pipeline itself is total: every input string produces a
//! valid document model. Errors only arise at the edges, when reading a
//! request or serializing the finished model.

use std::io;
use thiserror::Error;

/// Result type alias for hwpxprep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the normalization pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The generation request is structurally unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Error during rendering (JSON, text preview).
    #[error("Rendering error: {0}")]
    Render(String),
}
