//! Number lexing.
//!
//! A number is a run of ASCII digits with at most one `.` that is followed
//! by a digit. Languages widen this with their own continue characters
//! (`x`, hex digits, suffixes), which may appear anywhere after the first
//! digit.

use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        let language = self.language;
        let mut seen_dot = false;
        self.cursor.advance();

        while let Some(ch) = self.cursor.current() {
            if ch.is_ascii_digit() {
                self.cursor.advance();
            } else if ch == '.'
                && !seen_dot
                && self.cursor.peek(1).is_some_and(|c| c.is_ascii_digit())
            {
                seen_dot = true;
                self.cursor.advance();
            } else if language.is_number_continue(ch) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        TokenKind::Number
    }
}
