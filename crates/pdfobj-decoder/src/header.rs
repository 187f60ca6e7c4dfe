use pdfobj_wire::lexer::{parse_raw_int, skip_whitespace_and_comments};
use pdfobj_wire::{ByteCursor, WireError};

use crate::error::DecodeError;

/// One row of an object stream's header table.
///
/// ```text
///   header:  5 0 7 10 12 31 ...
///            │ │
///            │ └── offset, relative to /First
///            └──── object number
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    pub object_number: u32,
    pub offset: usize,
}

/// Read exactly `count` `(object number, offset)` pairs.
///
/// The cursor must sit at the start of the header. Whitespace and `%`
/// comments may precede every integer. Entries are returned in header
/// order; offsets are not required to be increasing.
///
/// # Errors
///
/// [`DecodeError::MalformedHeader`] with the index of the entry being
/// read when:
/// - input ends before `count` entries are complete
///   ([`WireError::UnexpectedEof`]);
/// - a token is not an unsigned integer, or does not fit an object
///   number (`u32`) or offset (`usize`) ([`WireError::InvalidInteger`]).
pub fn read_header(
    cursor: &mut ByteCursor<'_>,
    count: usize,
) -> Result<Vec<HeaderEntry>, DecodeError> {
    // A pair needs at least four bytes ("1 2 "), so don't trust `count`
    // for the allocation.
    let mut entries = Vec::with_capacity(count.min(cursor.len() / 4 + 1));

    for index in 0..count {
        let malformed = |source| DecodeError::MalformedHeader { index, source };

        let object_number = read_int(cursor).map_err(malformed)?;
        let object_number = u32::try_from(object_number.0)
            .map_err(|_| object_number.overflow())
            .map_err(malformed)?;

        let offset = read_int(cursor).map_err(malformed)?;
        let offset = usize::try_from(offset.0)
            .map_err(|_| offset.overflow())
            .map_err(malformed)?;

        entries.push(HeaderEntry {
            object_number,
            offset,
        });
    }

    Ok(entries)
}

/// An integer token and the offset it started at.
struct Token(u64, usize);

impl Token {
    fn overflow(&self) -> WireError {
        WireError::InvalidInteger {
            offset: self.1,
            token: self.0.to_string(),
        }
    }
}

fn read_int(cursor: &mut ByteCursor<'_>) -> Result<Token, WireError> {
    skip_whitespace_and_comments(cursor);
    let offset = cursor.offset();
    if cursor.is_done() {
        return Err(WireError::UnexpectedEof { offset });
    }
    Ok(Token(parse_raw_int(cursor)?, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str, count: usize) -> Result<Vec<HeaderEntry>, DecodeError> {
        read_header(&mut ByteCursor::new(input.as_bytes()), count)
    }

    fn entry(object_number: u32, offset: usize) -> HeaderEntry {
        HeaderEntry {
            object_number,
            offset,
        }
    }

    #[test]
    fn reads_pairs_in_order() {
        let entries = read("5 0 7 10 3 4 ", 3).unwrap();
        assert_eq!(entries, vec![entry(5, 0), entry(7, 10), entry(3, 4)]);
    }

    #[test]
    fn tolerates_mixed_whitespace_and_comments() {
        let entries = read("\r\n 5\t0 % first\n7\x0c10", 2).unwrap();
        assert_eq!(entries, vec![entry(5, 0), entry(7, 10)]);
    }

    #[test]
    fn stops_after_count() {
        let mut cursor = ByteCursor::new(b"1 0 2 5 <<");
        let entries = read_header(&mut cursor, 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(cursor.offset(), 7);
    }

    #[test]
    fn zero_entries() {
        assert!(read("", 0).unwrap().is_empty());
    }

    #[test]
    fn truncated_header() {
        let err = read("5 0 7", 2).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedHeader {
                index: 1,
                source: WireError::UnexpectedEof { offset: 5 }
            }
        ));
    }

    #[test]
    fn non_integer_token() {
        let err = read("5 0 x 10", 2).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedHeader {
                index: 1,
                source: WireError::InvalidInteger { offset: 4, .. }
            }
        ));
    }

    #[test]
    fn negative_offset_is_malformed() {
        let err = read("5 -1", 1).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedHeader {
                index: 0,
                source: WireError::InvalidInteger { .. }
            }
        ));
    }

    #[test]
    fn object_number_must_fit_u32() {
        let err = read("4294967296 0", 1).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedHeader {
                index: 0,
                source: WireError::InvalidInteger { offset: 0, .. }
            }
        ));
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let err = read("1 0", usize::MAX).unwrap_err();
        assert_eq!(err.entry_index(), Some(1));
    }
}
