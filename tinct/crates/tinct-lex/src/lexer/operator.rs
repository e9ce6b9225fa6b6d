//! Operator and punctuation lexing.
//!
//! There is no operator table: any maximal run of operator characters is
//! one token, so `==`, `<<=` and `->` come out whole. A run ends before a
//! comment marker or a string delimiter so that `x=//c` still yields a
//! comment.

use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    pub(crate) fn lex_operator(&mut self) -> TokenKind {
        let language = self.language;
        self.cursor.advance();

        while let Some(ch) = self.cursor.current() {
            if !language.is_operator(ch)
                || language.delimiter_for(ch).is_some()
                || self.at_comment_start()
            {
                break;
            }
            self.cursor.advance();
        }

        TokenKind::Operator
    }

    /// Punctuation is always a single character.
    pub(crate) fn lex_punctuation(&mut self) -> TokenKind {
        self.cursor.advance();
        TokenKind::Punctuation
    }
}
