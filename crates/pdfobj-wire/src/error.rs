/// Errors raised by the byte cursor and the lexical primitives.
///
/// Every variant carries the byte offset where the problem was found,
/// measured from the start of the buffer the cursor was built over.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete token could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A seek target lies outside the buffer.
    #[error("offset {offset} is out of range for a buffer of {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// Expected an unsigned integer literal.
    #[error("invalid integer {token:?} at offset {offset}")]
    InvalidInteger { offset: usize, token: String },

    /// Expected a numeric literal (optional sign, optional fraction).
    #[error("invalid number {token:?} at offset {offset}")]
    InvalidNumber { offset: usize, token: String },

    /// A specific byte was required but something else was found.
    #[error("expected byte {expected:#04X} at offset {offset}, found {found:#04X}")]
    UnexpectedByte { offset: usize, expected: u8, found: u8 },
}

impl WireError {
    /// Byte offset the error refers to.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEof { offset }
            | Self::OffsetOutOfRange { offset, .. }
            | Self::InvalidInteger { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::UnexpectedByte { offset, .. } => *offset,
        }
    }
}
