//! Immutable text buffer with character access and a line index.
//!
//! This module provides the [`Buffer`] type: the raw bytes of one opened
//! document, the encoding they were decoded with, the decoded characters and
//! the precomputed line-start offsets used for line-scoped scanning.

mod encoding;

use std::ops::Range;
use std::sync::Arc;

pub use encoding::{Encoding, EncodingIssue, EncodingIssueKind};

use crate::error::{BufferError, BufferResult};

/// A decoded, line-indexed document.
///
/// Cloning is cheap: the content is shared.
///
/// # Examples
///
/// ```
/// use tinct_util::Buffer;
///
/// let buffer = Buffer::from_text("main.c", "int x;\nint y;");
/// assert_eq!(buffer.len(), 13);
/// assert_eq!(buffer.char_at(4), Some('x'));
/// assert_eq!(buffer.line_count(), 2);
/// assert_eq!(buffer.line_of(9), 1);
/// ```
#[derive(Clone)]
pub struct Buffer {
    /// Display name (usually the path)
    name: String,
    /// Bytes as loaded
    raw: Arc<[u8]>,
    /// Encoding used to decode `raw`
    encoding: Encoding,
    /// Decoded characters; index = character offset
    chars: Arc<[char]>,
    /// Precomputed line start offsets
    line_starts: Arc<[usize]>,
    /// Decoding problems, in offset order
    encoding_issues: Arc<[EncodingIssue]>,
}

impl Buffer {
    /// Creates a buffer from raw bytes, detecting the encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_util::{Buffer, Encoding};
    ///
    /// let buffer = Buffer::from_bytes("a.txt", b"hi".to_vec());
    /// assert_eq!(buffer.encoding(), Encoding::Ascii);
    /// ```
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let raw = bytes.into();
        let encoding = Encoding::detect(&raw);
        Self::decode(name.into(), raw, encoding)
    }

    /// Creates a buffer from raw bytes with a declared encoding.
    ///
    /// Bytes inconsistent with `encoding` are kept as single characters and
    /// reported through [`Buffer::encoding_issues`].
    pub fn with_encoding(
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
        encoding: Encoding,
    ) -> Self {
        Self::decode(name.into(), bytes.into(), encoding)
    }

    /// Creates a buffer from text already held in memory.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let encoding = if text.is_ascii() {
            Encoding::Ascii
        } else {
            Encoding::Utf8
        };
        Self::decode(name.into(), Arc::from(text.as_bytes()), encoding)
    }

    fn decode(name: String, raw: Arc<[u8]>, encoding: Encoding) -> Self {
        let decoded = encoding::decode(&raw, encoding);
        let line_starts = Self::line_starts(&decoded.chars);
        Self {
            name,
            raw,
            encoding,
            chars: decoded.chars.into(),
            line_starts,
            encoding_issues: decoded.issues.into(),
        }
    }

    /// Compute line start offsets from decoded characters
    fn line_starts(chars: &[char]) -> Arc<[usize]> {
        let mut line_starts = vec![0];

        for (i, &ch) in chars.iter().enumerate() {
            match ch {
                '\n' => line_starts.push(i + 1),
                '\r' if chars.get(i + 1) != Some(&'\n') => line_starts.push(i + 1),
                _ => {},
            }
        }

        line_starts.into()
    }

    /// Get the buffer name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the encoding the bytes were decoded with
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Get the bytes as loaded
    #[inline]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Number of characters
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the buffer holds no characters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `offset`, or `None` past the end.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// All decoded characters.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Characters in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> &[char] {
        &self.chars[range]
    }

    /// Text of `range` collected into a string.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_util::Buffer;
    ///
    /// let buffer = Buffer::from_text("t", "fn main() {}");
    /// assert_eq!(buffer.text(3..7), "main");
    /// ```
    pub fn text(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    /// Extract the text of `start..end` with bounds checking
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_util::Buffer;
    ///
    /// let buffer = Buffer::from_text("t", "fn main() {}");
    /// assert_eq!(buffer.extract_range(0, 2).unwrap(), "fn");
    /// assert!(buffer.extract_range(0, 100).is_err());
    /// ```
    pub fn extract_range(&self, start: usize, end: usize) -> BufferResult<String> {
        if start > end {
            return Err(BufferError::InvalidRange { start, end });
        }
        if end > self.len() {
            return Err(BufferError::OutOfBounds {
                len: self.len(),
                start,
                end,
            });
        }
        Ok(self.text(start..end))
    }

    /// Get the total number of lines
    ///
    /// An empty buffer has one (empty) line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// All line start offsets, strictly increasing, first entry 0.
    #[inline]
    pub fn line_starts_table(&self) -> &[usize] {
        &self.line_starts
    }

    /// Get the offset where a line starts (0-indexed line number)
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// The 0-indexed line containing `offset`.
    ///
    /// Offsets at or past the end belong to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            // The table always starts with 0, so the insert point is >= 1.
            Err(insert_point) => insert_point - 1,
        }
    }

    /// Convert an offset to 1-indexed (line, column) coordinates
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_util::Buffer;
    ///
    /// let buffer = Buffer::from_text("t", "ab\ncd");
    /// assert_eq!(buffer.offset_to_line_col(4), (2, 2));
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        let col = offset.saturating_sub(self.line_starts[line]) + 1;
        (line + 1, col)
    }

    /// Character range of a 0-indexed line, without its line break.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = self.line_start(line)?;
        let mut end = self.line_start(line + 1).unwrap_or(self.len());
        while end > start && matches!(self.chars[end - 1], '\n' | '\r') {
            end -= 1;
        }
        Some(start..end)
    }

    /// Character range covering 0-indexed `lines`, line breaks included.
    pub fn lines_range(&self, lines: Range<usize>) -> BufferResult<Range<usize>> {
        if lines.start > lines.end {
            return Err(BufferError::InvalidRange {
                start: lines.start,
                end: lines.end,
            });
        }
        let start = self
            .line_start(lines.start)
            .ok_or(BufferError::InvalidLineNumber {
                line: lines.start,
                max_lines: self.line_count(),
            })?;
        let end = self.line_start(lines.end).unwrap_or(self.len());
        Ok(start..end)
    }

    /// Text of a 0-indexed line, without its line break.
    pub fn line_text(&self, line: usize) -> Option<String> {
        self.line_range(line).map(|range| self.text(range))
    }

    /// Decoding problems found while loading.
    #[inline]
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }

    /// Returns true if any bytes failed to decode
    #[inline]
    pub fn has_encoding_issues(&self) -> bool {
        !self.encoding_issues.is_empty()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("encoding", &self.encoding)
            .field("len", &self.len())
            .field("line_count", &self.line_count())
            .field("encoding_issues", &self.encoding_issues.len())
            .finish()
    }
}
