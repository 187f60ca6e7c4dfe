use pdfobj_types::TypeError;
use pdfobj_wire::WireError;

/// Errors from the value grammar while parsing one object.
///
/// Offsets are absolute positions in the buffer handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No value can start with this byte.
    #[error("unexpected byte {found:#04X} at offset {offset}")]
    UnexpectedByte { offset: usize, found: u8 },

    /// Input ended in the middle of a value.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A literal string's parentheses never balanced out.
    #[error("unbalanced parenthesis in string starting at offset {offset}")]
    UnbalancedParenthesis { offset: usize },

    /// A dictionary was followed by the `stream` keyword.
    ///
    /// Streams cannot be stored inside an object stream.
    #[error("stream at offset {offset} is not allowed inside an object stream")]
    NestedStream { offset: usize },

    /// Arrays and dictionaries nested deeper than the configured limit.
    #[error("nesting exceeds {max_depth} levels at offset {offset}")]
    NestingTooDeep { offset: usize, max_depth: usize },

    /// A lexical error from `pdfobj-wire` (bad number, unexpected byte).
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl ParseError {
    /// Byte offset where parsing failed.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedByte { offset, .. }
            | Self::UnexpectedEof { offset }
            | Self::UnbalancedParenthesis { offset }
            | Self::NestedStream { offset }
            | Self::NestingTooDeep { offset, .. } => *offset,
            Self::Wire(e) => e.offset(),
        }
    }
}

/// Errors from decoding an object stream.
///
/// ```text
///   DecodeError
///   ├── Reparse             ← decode() called on a used decoder
///   ├── MalformedHeader     ← bad (object number, offset) table
///   ├── OffsetOutOfRange    ← entry points outside the data
///   ├── ObjectParse         ← value grammar failed for one entry
///   └── InvalidDescriptor   ← /First or /N missing or unusable
/// ```
///
/// All but `Reparse` are data errors. None of them roll back objects
/// that were already assigned to the store before the failure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The decoder is one-shot and has already been started.
    ///
    /// This signals a caller bug, not bad input. No work is done.
    #[error("object stream decoder has already run; decode() may only be called once")]
    Reparse,

    /// The header table could not be read.
    #[error("malformed object stream header at entry {index}: {source}")]
    MalformedHeader {
        index: usize,
        #[source]
        source: WireError,
    },

    /// `first + entry offset` does not point inside the data.
    #[error(
        "object {object_number} (entry {index}) starts at offset {offset}, outside the {len}-byte stream"
    )]
    OffsetOutOfRange {
        index: usize,
        object_number: u32,
        offset: usize,
        len: usize,
    },

    /// The value grammar failed while parsing one member.
    #[error("failed to parse object {object_number} (entry {index}) at offset {offset}: {source}")]
    ObjectParse {
        index: usize,
        object_number: u32,
        offset: usize,
        #[source]
        source: ParseError,
    },

    /// The stream dictionary did not describe a usable object stream.
    #[error("invalid object stream dictionary: {0}")]
    InvalidDescriptor(#[from] TypeError),
}

impl DecodeError {
    /// Index of the header entry being processed when the error occurred.
    #[must_use]
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::MalformedHeader { index, .. }
            | Self::OffsetOutOfRange { index, .. }
            | Self::ObjectParse { index, .. } => Some(*index),
            Self::Reparse | Self::InvalidDescriptor(_) => None,
        }
    }
}
