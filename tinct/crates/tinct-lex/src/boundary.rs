//! Line-indexed restart points.
//!
//! A scan can only restart where the scanner is in `Default` mode, which is
//! any token start. [`BoundaryIndex`] records, for every line, the start of
//! the token covering the line's first character. A viewport scan begins at
//! that anchor and drops tokens before the requested range, so lines inside
//! a long block comment still come out as comment.
//!
//! ```text
//! text:     a /* b \n c */ d \n e
//! line 0:   anchor 0
//! line 1:   anchor 2   (inside the comment that starts on line 0)
//! line 2:   anchor 15  (the whitespace run ending the previous line)
//! ```

use std::ops::Range;

use tinct_lang::LanguageDefinition;
use tinct_util::{Buffer, BufferResult};

use crate::lexer::{ScanOptions, Scanner};
use crate::token::Token;

/// Per-line restart anchors for one buffer scanned with one definition.
///
/// The index is only valid for the pair it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryIndex {
    anchors: Vec<usize>,
    line_starts: Vec<usize>,
}

impl BoundaryIndex {
    /// Scans the whole buffer once and records an anchor per line.
    pub fn build(buffer: &Buffer, language: &LanguageDefinition) -> Self {
        let line_starts = buffer.line_starts_table().to_vec();
        let mut anchors = Vec::with_capacity(line_starts.len());

        for token in Scanner::new(buffer, language, 0) {
            while let Some(&line_start) = line_starts.get(anchors.len()) {
                if line_start >= token.end() {
                    break;
                }
                anchors.push(token.start);
            }
            if anchors.len() == line_starts.len() {
                break;
            }
        }
        // Lines starting at the end of the buffer have no covering token.
        anchors.extend_from_slice(&line_starts[anchors.len()..]);

        tracing::trace!(
            buffer = buffer.name(),
            language = language.name(),
            lines = anchors.len(),
            "built boundary index"
        );
        Self {
            anchors,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.anchors.len()
    }

    /// Restart offset for a 0-based line.
    pub fn anchor_for_line(&self, line: usize) -> Option<usize> {
        self.anchors.get(line).copied()
    }

    /// Restart offset at or before `offset`.
    pub fn anchor_for_offset(&self, offset: usize) -> usize {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert.saturating_sub(1),
        };
        self.anchors.get(line).copied().unwrap_or(0)
    }

    /// Returns true if `line` begins inside a token from an earlier line.
    pub fn is_continuation(&self, line: usize) -> bool {
        match (self.anchors.get(line), self.line_starts.get(line)) {
            (Some(anchor), Some(start)) => anchor < start,
            _ => false,
        }
    }

    /// Tokens overlapping the character range `range`.
    ///
    /// The first token may start before `range.start` and the last may end
    /// after `range.end`. An empty range yields nothing.
    pub fn tokens_in_range<'a>(
        &self,
        buffer: &'a Buffer,
        language: &'a LanguageDefinition,
        range: Range<usize>,
        options: ScanOptions,
    ) -> impl Iterator<Item = Token> + 'a {
        let anchor = self.anchor_for_offset(range.start);
        let Range { start, end } = range;
        let empty = start >= end;

        Scanner::with_options(buffer, language, anchor, options)
            .skip_while(move |token| token.end() <= start)
            .take_while(move |token| !empty && token.start < end)
    }

    /// Tokens overlapping the 0-based line range `lines`.
    pub fn tokens_in_lines<'a>(
        &self,
        buffer: &'a Buffer,
        language: &'a LanguageDefinition,
        lines: Range<usize>,
        options: ScanOptions,
    ) -> BufferResult<impl Iterator<Item = Token> + 'a> {
        let range = buffer.lines_range(lines)?;
        Ok(self.tokens_in_range(buffer, language, range, options))
    }
}
