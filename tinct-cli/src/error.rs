//! Error handling module for the tinct CLI.
//!
//! Library errors convert into [`TinctError`] so commands can use `?`
//! throughout.

use thiserror::Error;
use tinct_lang::LanguageError;
use tinct_util::BufferError;

/// Main error type for the tinct CLI application.
#[derive(Error, Debug)]
pub enum TinctError {
    /// Error when a configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when file operations fail.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error from loading, compiling or persisting languages.
    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<BufferError> for TinctError {
    fn from(err: BufferError) -> Self {
        TinctError::Validation(err.to_string())
    }
}

/// Result type alias using TinctError.
pub type Result<T> = std::result::Result<T, TinctError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TinctError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_validation_error_display() {
        let err = TinctError::Validation("bad range".to_string());
        assert_eq!(err.to_string(), "Validation error: bad range");
    }

    #[test]
    fn test_language_error_conversion() {
        let err: TinctError = LanguageError::MissingField("name").into();
        assert!(matches!(err, TinctError::Language(_)));
        assert!(err.to_string().starts_with("Language error: "));
    }

    #[test]
    fn test_buffer_error_conversion() {
        let err: TinctError = BufferError::InvalidLineNumber {
            line: 9,
            max_lines: 2,
        }
        .into();
        assert!(matches!(err, TinctError::Validation(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TinctError = io_err.into();
        assert!(matches!(err, TinctError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TinctError = json_err.into();
        assert!(matches!(err, TinctError::Json(_)));
    }
}
