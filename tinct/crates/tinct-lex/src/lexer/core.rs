//! Core scanner implementation.
//!
//! This module contains the Scanner struct and the rule dispatch. At each
//! position in `Default` mode the first matching rule wins:
//!
//! 1. block comment start marker
//! 2. line comment prefix
//! 3. string delimiter
//! 4. identifier start (keyword lookup on exit)
//! 5. ASCII digit
//! 6. operator character (maximal run)
//! 7. punctuation character (single)
//! 8. anything else: a run of whitespace / unrecognized characters

use std::iter::FusedIterator;

use tinct_lang::LanguageDefinition;
use tinct_util::Buffer;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scanner settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    /// Emit `Whitespace` tokens instead of skipping those runs
    pub emit_whitespace: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            emit_whitespace: true,
        }
    }
}

/// Lexical mode of a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexMode {
    Default,
    InBlockComment,
    /// Inside a string opened by this character
    InString(char),
}

/// Scan-local state, observable between tokens.
///
/// Between tokens the mode is always [`LexMode::Default`], so `offset` is a
/// safe restart point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanState {
    pub mode: LexMode,
    pub offset: usize,
    /// 0-based line index of `offset`
    pub line: usize,
}

/// Lazy token stream over one buffer.
///
/// The scanner borrows both the buffer and the definition; any number of
/// scanners may run over the same pair at once.
pub struct Scanner<'a> {
    /// Character cursor for buffer traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Rules driving classification.
    pub(crate) language: &'a LanguageDefinition,

    pub(crate) options: ScanOptions,

    /// Mode while inside a multi-character construct.
    pub(crate) mode: LexMode,

    /// Offset where the current token starts.
    pub(crate) token_start: usize,

    /// Scratch space for keyword lookup.
    pub(crate) word: String,
}

/// Scans `buffer` with `language` from `start`, emitting whitespace tokens.
///
/// `start` must be a `Default`-mode boundary (the start of the buffer or of
/// a token from an earlier scan) for the result to match a full scan.
///
/// # Examples
///
/// ```
/// use tinct_lang::{GroupSpec, LanguageDefinition, LanguageSpec};
/// use tinct_lex::{scan, TokenKind};
/// use tinct_util::Buffer;
///
/// let lang = LanguageDefinition::build(
///     LanguageSpec::new("C").group(GroupSpec::from_words("keywords", "int")),
/// );
/// let buffer = Buffer::from_text("t.c", "int x;");
/// let kinds: Vec<TokenKind> = scan(&buffer, &lang, 0).map(|t| t.kind).collect();
/// assert_eq!(kinds.len(), 4);
/// assert_eq!(kinds[1], TokenKind::Whitespace);
/// ```
pub fn scan<'a>(buffer: &'a Buffer, language: &'a LanguageDefinition, start: usize) -> Scanner<'a> {
    Scanner::new(buffer, language, start)
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default options.
    pub fn new(buffer: &'a Buffer, language: &'a LanguageDefinition, start: usize) -> Self {
        Self::with_options(buffer, language, start, ScanOptions::default())
    }

    /// Creates a scanner; `start` is clamped to the buffer length.
    pub fn with_options(
        buffer: &'a Buffer,
        language: &'a LanguageDefinition,
        start: usize,
        options: ScanOptions,
    ) -> Self {
        let start = start.min(buffer.len());
        Self {
            cursor: Cursor::at(buffer.chars(), start, buffer.line_of(start)),
            language,
            options,
            mode: LexMode::Default,
            token_start: start,
            word: String::new(),
        }
    }

    pub fn language(&self) -> &'a LanguageDefinition {
        self.language
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Current mode, offset and line.
    pub fn state(&self) -> ScanState {
        ScanState {
            mode: self.mode,
            offset: self.cursor.position(),
            line: self.cursor.line(),
        }
    }

    /// Returns the next token, or `None` at the end of the buffer.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let token = self.lex_token()?;
            if token.kind == TokenKind::Whitespace && !self.options.emit_whitespace {
                continue;
            }
            return Some(token);
        }
    }

    fn lex_token(&mut self) -> Option<Token> {
        self.token_start = self.cursor.position();
        let ch = self.cursor.current()?;

        let kind = if self.language.is_plain_text() {
            self.lex_plain_word(ch)
        } else {
            self.dispatch(ch)
        };

        self.mode = LexMode::Default;
        Some(Token::new(
            self.token_start,
            self.cursor.position() - self.token_start,
            kind,
        ))
    }

    fn dispatch(&mut self, ch: char) -> TokenKind {
        let language = self.language;

        if let Some(block) = language.block_comment() {
            if self.cursor.starts_with(&block.start) {
                return self.lex_block_comment(block);
            }
        }
        if let Some(prefix) = language.line_comment() {
            if self.cursor.starts_with(prefix) {
                return self.lex_line_comment(prefix);
            }
        }
        if let Some(delimiter) = language.delimiter_for(ch) {
            return self.lex_string(delimiter);
        }
        if language.is_ident_start(ch) {
            return self.lex_identifier();
        }
        if ch.is_ascii_digit() {
            return self.lex_number();
        }
        if language.is_operator(ch) {
            return self.lex_operator();
        }
        if language.is_punctuation(ch) {
            return self.lex_punctuation();
        }
        self.lex_whitespace()
    }

    /// Returns true if one of rules 1-7 applies at the cursor.
    pub(crate) fn starts_token(&self) -> bool {
        let Some(ch) = self.cursor.current() else {
            return false;
        };
        let language = self.language;
        self.at_comment_start()
            || language.delimiter_for(ch).is_some()
            || language.is_ident_start(ch)
            || ch.is_ascii_digit()
            || language.is_operator(ch)
            || language.is_punctuation(ch)
    }

    /// Consumes a run of characters no other rule claims.
    fn lex_whitespace(&mut self) -> TokenKind {
        self.cursor.advance();
        while !self.cursor.is_at_end() && !self.starts_token() {
            self.cursor.advance();
        }
        TokenKind::Whitespace
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for Scanner<'_> {}
