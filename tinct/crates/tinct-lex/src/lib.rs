//! tinct-lex - Data-Driven Scanner for Syntax Highlighting
//!
//! This crate turns a [`Buffer`](tinct_util::Buffer) into a stream of
//! classified [`Token`]s, driven entirely by a
//! [`LanguageDefinition`](tinct_lang::LanguageDefinition). There is no
//! per-language code: keywords, operator and punctuation characters, comment
//! markers and string delimiters all come from the definition.
//!
//! # Example Usage
//!
//! ```
//! use tinct_lang::{GroupSpec, LanguageDefinition, LanguageSpec};
//! use tinct_lex::{scan, TokenKind};
//! use tinct_util::Buffer;
//!
//! let lang = LanguageDefinition::build(
//!     LanguageSpec::new("C")
//!         .line_comment("//")
//!         .group(GroupSpec::from_words("keywords", "return")),
//! );
//! let buffer = Buffer::from_text("t.c", "return 1; // done");
//!
//! let kinds: Vec<TokenKind> = scan(&buffer, &lang, 0).map(|t| t.kind).collect();
//! assert_eq!(kinds.last(), Some(&TokenKind::LineComment));
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - token kinds and positioned tokens
//! - [`lexer`] - the scanner state machine
//! - [`cursor`] - character cursor with line tracking
//! - [`boundary`] - per-line restart anchors for viewport scans
//!
//! # Guarantees
//!
//! - Tokens are emitted in order, never overlap and never have zero length.
//!   With whitespace emission on (the default) they cover the buffer with no
//!   gaps.
//! - Scanning never fails. A comment or string that is not closed comes out
//!   as an `Unterminated*` token and scanning carries on after it.
//! - Scanning is a pure function of buffer, definition and start offset, so
//!   any number of scans may share one buffer and one definition.

pub mod boundary;
pub mod cursor;
pub mod lexer;
pub mod token;

pub use boundary::BoundaryIndex;
pub use cursor::{Cursor, CursorSnapshot};
pub use lexer::{scan, LexMode, ScanOptions, ScanState, Scanner};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod edge_cases;
