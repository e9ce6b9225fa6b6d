//! String literal lexing.
//!
//! A literal opened by a delimiter runs to the delimiter's unescaped close
//! character. The escape character skips the next character without looking
//! at it, so an escaped line break continues the literal. When the escape
//! and close characters are the same, a doubled close character is an
//! escaped close (`'it''s'`).

use tinct_lang::Delimiter;

use super::core::LexMode;
use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Lexes a string literal opened at the cursor.
    ///
    /// Reaching a line break or the end of the buffer first yields an
    /// unterminated string ending there.
    pub(crate) fn lex_string(&mut self, delimiter: &Delimiter) -> TokenKind {
        self.mode = LexMode::InString(delimiter.open);
        self.cursor.advance();

        loop {
            let Some(ch) = self.cursor.current() else {
                tracing::trace!(start = self.token_start, "string reaches end of buffer");
                return TokenKind::UnterminatedString;
            };

            if ch == delimiter.close {
                self.cursor.advance();
                if delimiter.escape == Some(delimiter.close) && self.cursor.current() == Some(ch) {
                    self.cursor.advance();
                    continue;
                }
                return TokenKind::StringLiteral;
            }

            if Some(ch) == delimiter.escape {
                self.cursor.advance();
                if self.cursor.current() == Some('\r') {
                    self.cursor.advance();
                    self.cursor.match_char('\n');
                } else {
                    self.cursor.advance();
                }
                continue;
            }

            if ch == '\n' || ch == '\r' {
                tracing::trace!(start = self.token_start, "string cut off by line break");
                return TokenKind::UnterminatedString;
            }

            self.cursor.advance();
        }
    }
}
