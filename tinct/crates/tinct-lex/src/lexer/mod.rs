//! Scanner module.
//!
//! This module organizes the scanner implementation into smaller, focused components:
//! - `core` - Scanner struct, options, state and rule dispatch
//! - `comment` - Line and block comments
//! - `string` - Delimited string literals
//! - `identifier` - Identifiers, keywords and plain-text words
//! - `number` - Number literals
//! - `operator` - Operator runs and punctuation

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use self::core::{scan, LexMode, ScanOptions, ScanState, Scanner};
