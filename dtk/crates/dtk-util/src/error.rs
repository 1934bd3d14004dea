//! Core error types for dtk-util crate
//!
//! This module defines error types used throughout the util crate.

use thiserror::Error;

/// Error type for source file queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Invalid byte range
    #[error("Invalid range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Range out of bounds for file
    #[error("Range out of bounds: file has {file_len} bytes, range is {start}..{end}")]
    OutOfBounds {
        file_len: usize,
        start: usize,
        end: usize,
    },

    /// Range splits a multi-byte character
    #[error("Range {start}..{end} is not on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    /// Invalid line number
    #[error("Invalid line number: {line} (file has {max_lines} lines)")]
    InvalidLineNumber { line: usize, max_lines: usize },
}

/// Result type alias for source file queries
pub type SourceResult<T> = std::result::Result<T, SourceError>;
