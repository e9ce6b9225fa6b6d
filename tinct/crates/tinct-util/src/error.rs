//! Core error types for tinct-util crate
//!
//! Buffer construction never fails; these errors only come out of the
//! bounds-checked extraction helpers.

use thiserror::Error;

/// Error type for buffer range operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Invalid range (start after end)
    #[error("Invalid range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Range out of bounds for buffer
    #[error("Range out of bounds: buffer has {len} characters, range is {start}..{end}")]
    OutOfBounds { len: usize, start: usize, end: usize },

    /// Invalid line number
    #[error("Invalid line number: {line} (buffer has {max_lines} lines)")]
    InvalidLineNumber { line: usize, max_lines: usize },
}

/// Result type alias for buffer operations
pub type BufferResult<T> = std::result::Result<T, BufferError>;
