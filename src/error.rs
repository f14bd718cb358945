//! Global error handling for codestruct
//!
//! Per-entry I/O failures during a scan are reported as events and never
//! reach this type; everything here aborts the run at the top level.

use std::io;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for codestruct operations
#[derive(Error, Debug)]
pub enum CodeStructError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Specialized Result type for codestruct operations
pub type Result<T> = std::result::Result<T, CodeStructError>;
