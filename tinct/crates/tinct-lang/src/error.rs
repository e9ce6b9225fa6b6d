//! Error types for loading and compiling language definitions.
//!
//! None of these ever reach a scan: the manager logs them and falls back to
//! the plain-text definition.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for language source, compiled file and extension map handling
#[derive(Debug, Error)]
pub enum LanguageError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The language source is not valid TOML or has the wrong shape
    #[error("Invalid language source: {0}")]
    Toml(#[from] toml::de::Error),

    /// A compiled language file line could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required field is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Compiled file written by a newer format revision
    #[error("Unsupported compiled format version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A keyword refers to a group that was never declared
    #[error("Keyword '{word}' refers to undeclared group {group}")]
    InvalidGroup { word: String, group: u32 },

    /// A field that must hold exactly one character holds something else
    #[error("Invalid character for {field}: {value:?}")]
    InvalidChar { field: &'static str, value: String },

    /// A compiled keyword character is missing from its key set or sits in
    /// the operator or punctuation set
    #[error("Keyword '{keyword}': character {ch:?} conflicts with {set}")]
    KeywordCharClash {
        keyword: String,
        ch: char,
        set: &'static str,
    },

    /// Two languages would be compiled into the same file
    #[error("Languages '{first}' and '{second}' both compile to {}", path.display())]
    CompiledNameClash {
        first: String,
        second: String,
        path: PathBuf,
    },

    /// The extension map could not be (de)serialized
    #[error("Extension map error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LanguageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for language operations
pub type LanguageResult<T> = std::result::Result<T, LanguageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = LanguageError::parse(7, "expected '='");
        assert_eq!(err.to_string(), "Parse error at line 7: expected '='");
    }

    #[test]
    fn test_unsupported_version_display() {
        let err = LanguageError::UnsupportedVersion {
            found: 3,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported compiled format version 3 (supported up to 1)"
        );
    }

    #[test]
    fn test_invalid_char_display() {
        let err = LanguageError::InvalidChar {
            field: "delimiter open",
            value: "ab".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid character for delimiter open: \"ab\"");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = LanguageError::io(
            "missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error on missing.toml: gone");
    }
}
