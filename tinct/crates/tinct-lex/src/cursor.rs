//! Character cursor for traversing a buffer.
//!
//! This module provides the `Cursor` struct which maintains position state
//! while walking a buffer's decoded characters. Positions are character
//! offsets; the current 0-based line index is kept in step with every
//! advance, counting `\n`, `\r\n` and a lone `\r` as one line break each.

/// A cursor over decoded characters.
///
/// # Example
///
/// ```
/// use tinct_lex::Cursor;
///
/// let chars: Vec<char> = "int x;".chars().collect();
/// let mut cursor = Cursor::new(&chars);
///
/// assert_eq!(cursor.current(), Some('i'));
/// cursor.advance();
/// assert_eq!(cursor.current(), Some('n'));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    /// The characters being traversed.
    chars: &'a [char],

    /// Current character offset.
    position: usize,

    /// Current line index (0-based).
    line: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the first character.
    pub fn new(chars: &'a [char]) -> Self {
        Self::at(chars, 0, 0)
    }

    /// Creates a cursor at `position`, which lies on line `line`.
    ///
    /// `position` is clamped to the end of `chars`.
    pub fn at(chars: &'a [char], position: usize, line: usize) -> Self {
        Self {
            chars,
            position: position.min(chars.len()),
            line,
        }
    }

    /// The character under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// The character `offset` positions ahead (0 = current).
    ///
    /// # Example
    ///
    /// ```
    /// use tinct_lex::Cursor;
    ///
    /// let chars: Vec<char> = "abc".chars().collect();
    /// let cursor = Cursor::new(&chars);
    /// assert_eq!(cursor.peek(2), Some('c'));
    /// assert_eq!(cursor.peek(3), None);
    /// ```
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Advances one character, keeping the line index current.
    ///
    /// Does nothing at the end.
    #[inline]
    pub fn advance(&mut self) {
        let Some(ch) = self.current() else {
            return;
        };
        self.position += 1;
        match ch {
            '\n' => self.line += 1,
            '\r' if self.current() != Some('\n') => self.line += 1,
            _ => {},
        }
    }

    /// Advances up to `count` characters.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Consumes the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true if the upcoming characters spell `marker`.
    ///
    /// An empty marker never matches.
    pub fn starts_with(&self, marker: &str) -> bool {
        !marker.is_empty()
            && marker
                .chars()
                .enumerate()
                .all(|(i, ch)| self.peek(i) == Some(ch))
    }

    /// Consumes characters while `pred` holds; returns how many.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let start = self.position;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
        self.position - start
    }

    /// Current character offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current line index (0-based).
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Characters from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a [char] {
        &self.chars[start.min(self.position)..self.position]
    }

    /// Characters from the cursor to the end.
    pub fn remaining(&self) -> &'a [char] {
        &self.chars[self.position..]
    }

    /// Saves the current state.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
        }
    }

    /// Restores a state saved by [`Cursor::snapshot`].
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
    }
}

/// A snapshot of cursor state that can be restored later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// Character offset.
    pub position: usize,
    /// Line index (0-based).
    pub line: usize,
}
