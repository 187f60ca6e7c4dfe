use std::ops::Range;

use crate::error::WireError;

/// Line and column of a byte offset, both 1-based.
///
/// Only computed on demand for diagnostics; the cursor itself tracks
/// nothing but the raw offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Seekable read cursor over a fixed byte buffer.
///
/// The cursor never copies the buffer. Reads advance the position by
/// one byte; [`seek`](Self::seek) moves it anywhere inside the buffer.
///
/// ```text
///   buf:  [ 3 4 2 0 ... ]
///                ^
///                pos
/// ```
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at offset 0.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Move to an absolute position.
    ///
    /// Valid targets are `0..len`. A position at or past the end has no
    /// byte to read and is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OffsetOutOfRange`] if `offset >= len`.
    pub fn seek(&mut self, offset: usize) -> Result<(), WireError> {
        if offset >= self.buf.len() {
            return Err(WireError::OffsetOutOfRange {
                offset,
                len: self.buf.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Return to a previously observed position.
    ///
    /// Unlike [`seek`](Self::seek) this accepts `len` itself (the
    /// position after the last byte), since a parser may backtrack to
    /// the end of input. Larger values clamp to `len`.
    pub fn rewind(&mut self, offset: usize) {
        self.pos = offset.min(self.buf.len());
    }

    /// Current absolute position.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// `true` once every byte has been consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The byte at the current position, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// The byte `n` positions past the current one.
    #[must_use]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.buf.get(self.pos + n).copied()
    }

    /// Consume and return the current byte.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consume the current byte, requiring it to equal `expected`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] at end of input.
    /// - [`WireError::UnexpectedByte`] if a different byte is found. The
    ///   cursor does not advance in that case.
    pub fn assert_next(&mut self, expected: u8) -> Result<(), WireError> {
        match self.peek() {
            None => Err(WireError::UnexpectedEof { offset: self.pos }),
            Some(found) if found != expected => Err(WireError::UnexpectedByte {
                offset: self.pos,
                expected,
                found,
            }),
            Some(_) => {
                self.pos += 1;
                Ok(())
            }
        }
    }

    /// Consume `keyword` if the input continues with exactly those bytes.
    ///
    /// On a mismatch the position is left untouched and `false` is
    /// returned.
    pub fn match_keyword(&mut self, keyword: &[u8]) -> bool {
        let end = self.pos + keyword.len();
        if self.buf.get(self.pos..end) == Some(keyword) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Borrow a range of the underlying buffer, clamped to its length.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &'a [u8] {
        let end = range.end.min(self.buf.len());
        let start = range.start.min(end);
        &self.buf[start..end]
    }

    /// Compute the line/column of `offset` by scanning for line breaks.
    ///
    /// CR, LF and CRLF each count as one line break.
    #[must_use]
    pub fn location(&self, offset: usize) -> Location {
        let prefix = self.slice(0..offset);
        let mut line = 1;
        let mut line_start = 0;
        let mut i = 0;
        while i < prefix.len() {
            match prefix[i] {
                b'\r' if prefix.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line += 1;
                    line_start = i;
                }
                b'\r' | b'\n' => {
                    i += 1;
                    line += 1;
                    line_start = i;
                }
                _ => i += 1,
            }
        }
        Location {
            line,
            column: offset.min(prefix.len()) - line_start + 1,
            offset,
        }
    }
}
