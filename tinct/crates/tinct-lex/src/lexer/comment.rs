//! Comment lexing.
//!
//! Block comments do not nest: the first end marker after the start marker
//! closes the comment.

use tinct_lang::BlockComment;

use super::core::LexMode;
use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Lexes a block comment starting at the cursor.
    ///
    /// Without an end marker the comment runs to the end of the buffer and
    /// nothing follows it.
    pub(crate) fn lex_block_comment(&mut self, block: &BlockComment) -> TokenKind {
        self.mode = LexMode::InBlockComment;
        self.cursor.advance_n(block.start.chars().count());

        loop {
            if self.cursor.is_at_end() {
                tracing::trace!(start = self.token_start, "unterminated block comment");
                return TokenKind::UnterminatedBlockComment;
            }
            if self.cursor.starts_with(&block.end) {
                self.cursor.advance_n(block.end.chars().count());
                return TokenKind::BlockComment;
            }
            self.cursor.advance();
        }
    }

    /// Lexes a line comment up to (not including) the next line break.
    pub(crate) fn lex_line_comment(&mut self, prefix: &str) -> TokenKind {
        self.cursor.advance_n(prefix.chars().count());
        self.cursor.eat_while(|c| c != '\n' && c != '\r');
        TokenKind::LineComment
    }

    /// Returns true if a comment marker starts at the cursor.
    pub(crate) fn at_comment_start(&self) -> bool {
        let language = self.language;
        language
            .block_comment()
            .is_some_and(|b| self.cursor.starts_with(&b.start))
            || language
                .line_comment()
                .is_some_and(|p| self.cursor.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use crate::{scan, Token, TokenKind};
    use tinct_lang::{LanguageDefinition, LanguageSpec};
    use tinct_util::Buffer;

    fn lex(lang: &LanguageDefinition, text: &str) -> Vec<Token> {
        let buffer = Buffer::from_text("t", text);
        scan(&buffer, lang, 0).collect()
    }

    fn c_comments() -> LanguageDefinition {
        LanguageDefinition::build(LanguageSpec::new("C").line_comment("//").block_comment("/*", "*/"))
    }

    #[test]
    fn test_line_comment_stops_at_break() {
        let tokens = lex(&c_comments(), "// hi\r\nx");
        assert_eq!(tokens[0], Token::new(0, 5, TokenKind::LineComment));
        assert_eq!(tokens[1], Token::new(5, 2, TokenKind::Whitespace));
    }

    #[test]
    fn test_block_comment_takes_precedence_over_operators() {
        let tokens = lex(&c_comments(), "a/*b*/+");
        assert_eq!(tokens[1], Token::new(1, 5, TokenKind::BlockComment));
        assert_eq!(tokens[2], Token::new(6, 1, TokenKind::Operator));
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        let tokens = lex(&c_comments(), "/* /* */ */");
        assert_eq!(tokens[0], Token::new(0, 8, TokenKind::BlockComment));
        assert_eq!(tokens[2].kind, TokenKind::Operator);
    }

    #[test]
    fn test_markers_do_not_overlap() {
        let tokens = lex(&c_comments(), "/*/ x");
        assert_eq!(tokens, vec![Token::new(0, 5, TokenKind::UnterminatedBlockComment)]);
    }

    #[test]
    fn test_multi_char_markers() {
        let lang = LanguageDefinition::build(
            LanguageSpec::new("Lua").line_comment("--").block_comment("--[[", "]]"),
        );
        let tokens = lex(&lang, "--[[ a ]]-- b");
        assert_eq!(tokens[0], Token::new(0, 9, TokenKind::BlockComment));
        assert_eq!(tokens[1], Token::new(9, 4, TokenKind::LineComment));
    }
}
