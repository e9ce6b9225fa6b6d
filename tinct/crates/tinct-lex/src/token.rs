//! Token definitions.
//!
//! A [`Token`] is a classified span of the buffer. Offsets and lengths count
//! characters; keyword tokens carry the id of the group that owns the word.

use std::fmt;
use std::ops::Range;

use tinct_lang::GroupId;
use tinct_util::Buffer;

/// Classification of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// A word from the language's keyword table
    Keyword(GroupId),
    Number,
    /// Maximal run of operator characters
    Operator,
    /// A single punctuation character
    Punctuation,
    LineComment,
    BlockComment,
    StringLiteral,
    /// Whitespace or unrecognized characters
    Whitespace,
    /// Block comment running to the end of the buffer
    UnterminatedBlockComment,
    /// String literal cut off by a line break or the end of the buffer
    UnterminatedString,
}

impl TokenKind {
    /// Returns true for the unterminated-construct variants.
    pub fn is_unterminated(self) -> bool {
        matches!(
            self,
            TokenKind::UnterminatedBlockComment | TokenKind::UnterminatedString
        )
    }

    /// Group id of a keyword.
    pub fn group(self) -> Option<GroupId> {
        match self {
            TokenKind::Keyword(group) => Some(group),
            _ => None,
        }
    }

    /// Short lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::LineComment => "line-comment",
            TokenKind::BlockComment => "block-comment",
            TokenKind::StringLiteral => "string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::UnterminatedBlockComment => "unterminated-block-comment",
            TokenKind::UnterminatedString => "unterminated-string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(group) => write!(f, "keyword({})", group),
            other => f.write_str(other.name()),
        }
    }
}

/// A classified, positioned span of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// Offset of the first character
    pub start: usize,
    /// Length in characters (never 0)
    pub len: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(start: usize, len: usize, kind: TokenKind) -> Self {
        Self { start, len, kind }
    }

    /// Offset one past the last character.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.kind.is_unterminated()
    }

    #[inline]
    pub fn group(&self) -> Option<GroupId> {
        self.kind.group()
    }

    /// The token's text in `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if the token does not lie within `buffer`.
    pub fn text(&self, buffer: &Buffer) -> String {
        buffer.text(self.range())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}+{}", self.kind, self.start, self.len)
    }
}
