//! tinct-lang - Language Definitions for the tinct Scanner
//!
//! This crate turns declarative language descriptions into the immutable
//! rule sets the scanner runs on, and resolves file extensions to them.
//!
//! # Example Usage
//!
//! ```
//! use tinct_lang::{GroupSpec, LanguageDefinition, LanguageManager, LanguageSpec};
//!
//! // Build a definition directly
//! let mini = LanguageDefinition::build(
//!     LanguageSpec::new("Mini")
//!         .extensions(".mini")
//!         .line_comment("#")
//!         .group(GroupSpec::from_words("keywords", "let in")),
//! );
//! assert!(mini.lookup_keyword("let").is_some());
//!
//! // Or resolve one of the bundled languages by extension
//! let manager = LanguageManager::bundled();
//! assert_eq!(manager.resolve(".c").name(), "C");
//! ```
//!
//! # Module Structure
//!
//! - [`definition`] - `LanguageDefinition`, its build step and parts
//! - [`source`] - the TOML language source (single source of truth)
//! - [`compiled`] - the `Key = value` compiled-language format
//! - [`extension_map`] - extension to language-name lookup table
//! - [`manager`] - resolution, caching and plain-text fallback
//! - [`error`] - `LanguageError`
//!
//! # Derived Character Sets
//!
//! Operator and punctuation characters start from fixed alphabets and lose
//! every character used in any keyword, so a character in a keyword can
//! never be classified as an operator or punctuation:
//!
//! | Set          | Start                   | Then                          |
//! |--------------|-------------------------|-------------------------------|
//! | operators    | ``-+=><\|^%*&/!~``      | minus keyword characters      |
//! | punctuation  | ``:;?.,][{}()$#@\`"``   | minus keyword characters      |
//! | key_start    | empty                   | plus first keyword characters |
//! | key_continue | empty                   | plus other keyword characters |

pub mod compiled;
pub mod definition;
pub mod error;
pub mod extension_map;
pub mod manager;
pub mod source;

// Re-export main types for convenience
pub use compiled::{
    compiled_file_name, load_compiled, parse_compiled, save_compiled, write_compiled,
    COMPILED_FORMAT_VERSION,
};
pub use definition::{
    BlockComment, Delimiter, GroupId, GroupSpec, Keyword, KeywordGroup, LanguageDefinition,
    LanguageSpec, OPERATOR_ALPHABET, PLAIN_TEXT_NAME, PUNCTUATION_ALPHABET,
};
pub use error::{LanguageError, LanguageResult};
pub use extension_map::{normalize_extension, ExtensionMap, EXTENSION_MAP_VERSION};
pub use manager::{LanguageManager, LanguageSummary, ManagerConfig, SourceLocation};
pub use source::{LanguageRecord, LanguageSource, BUNDLED_SOURCE};

static_assertions::assert_impl_all!(LanguageDefinition: Send, Sync);

#[cfg(test)]
mod edge_cases;
