//! Token categories the palette assigns colours to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tinct_lex::TokenKind;

use crate::error::PaletteError;

/// A colourable class of tokens.
///
/// Both comment kinds share [`Category::Comment`]; both unterminated kinds
/// share [`Category::Error`]. Whitespace has no category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Identifier,
    Keyword,
    Number,
    Operator,
    Punctuation,
    Comment,
    String,
    Error,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Identifier,
        Category::Keyword,
        Category::Number,
        Category::Operator,
        Category::Punctuation,
        Category::Comment,
        Category::String,
        Category::Error,
    ];

    /// The category of a token kind, `None` for whitespace.
    pub fn of(kind: TokenKind) -> Option<Self> {
        let category = match kind {
            TokenKind::Identifier => Category::Identifier,
            TokenKind::Keyword(_) => Category::Keyword,
            TokenKind::Number => Category::Number,
            TokenKind::Operator => Category::Operator,
            TokenKind::Punctuation => Category::Punctuation,
            TokenKind::LineComment | TokenKind::BlockComment => Category::Comment,
            TokenKind::StringLiteral => Category::String,
            TokenKind::UnterminatedBlockComment | TokenKind::UnterminatedString => Category::Error,
            TokenKind::Whitespace => return None,
        };
        Some(category)
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Identifier => "identifier",
            Category::Keyword => "keyword",
            Category::Number => "number",
            Category::Operator => "operator",
            Category::Punctuation => "punctuation",
            Category::Comment => "comment",
            Category::String => "string",
            Category::Error => "error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaletteError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_lang::GroupId;

    #[test]
    fn test_category_of() {
        assert_eq!(Category::of(TokenKind::Keyword(GroupId(3))), Some(Category::Keyword));
        assert_eq!(Category::of(TokenKind::LineComment), Some(Category::Comment));
        assert_eq!(Category::of(TokenKind::UnterminatedString), Some(Category::Error));
        assert_eq!(Category::of(TokenKind::Whitespace), None);
    }

    #[test]
    fn test_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert_eq!("Comment".parse::<Category>(), Ok(Category::Comment));
        assert!(matches!(
            "whitespace".parse::<Category>(),
            Err(PaletteError::UnknownCategory(_))
        ));
    }
}
