//! Error handling module for the dtkt CLI.
//!
//! Lexing itself never fails; these errors cover everything around it:
//! configuration, file access, argument validation and reporting.

use thiserror::Error;

/// Main error type for the dtkt CLI application.
#[derive(Error, Debug)]
pub enum DtktError {
    /// Error when a configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when file operations fail.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when a command finishes with failures to report.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using DtktError.
pub type Result<T> = std::result::Result<T, DtktError>;
