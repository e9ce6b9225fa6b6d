//! Palette errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// A colour that is not `#rrggbb`
    #[error("Invalid colour '{value}': {reason}")]
    InvalidColor { value: String, reason: &'static str },

    #[error("Unknown token category '{0}'")]
    UnknownCategory(String),
}

pub type PaletteResult<T> = std::result::Result<T, PaletteError>;
