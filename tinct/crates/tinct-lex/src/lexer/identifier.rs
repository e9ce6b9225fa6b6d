//! Identifier and keyword lexing.

use crate::token::TokenKind;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Lexes an identifier and resolves it against the keyword table.
    ///
    /// Resolution is by exact text only; a keyword prefix inside a longer
    /// word is an identifier.
    pub(crate) fn lex_identifier(&mut self) -> TokenKind {
        let language = self.language;
        self.cursor.advance();
        self.cursor.eat_while(|c| language.is_ident_continue(c));

        self.word.clear();
        self.word.extend(self.cursor.slice_from(self.token_start));

        match language.lookup_keyword(&self.word) {
            Some(group) => TokenKind::Keyword(group),
            None => TokenKind::Identifier,
        }
    }

    /// Plain text: a whitespace run, or a run of anything else as one word.
    pub(crate) fn lex_plain_word(&mut self, ch: char) -> TokenKind {
        if ch.is_whitespace() {
            self.cursor.eat_while(char::is_whitespace);
            TokenKind::Whitespace
        } else {
            self.cursor.eat_while(|c| !c.is_whitespace());
            TokenKind::Identifier
        }
    }
}
