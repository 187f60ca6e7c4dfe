//! Lexical primitives shared by the header reader and the value parser.
//!
//! Character classes follow the PDF grammar:
//!
//! ```text
//! ┌──────────────┬───────────────────────────────────────────┐
//! │ Class        │ Bytes                                     │
//! ├──────────────┼───────────────────────────────────────────┤
//! │ whitespace   │ NUL 0x00, TAB 0x09, LF 0x0A, FF 0x0C,     │
//! │              │ CR 0x0D, SPACE 0x20                       │
//! │ delimiter    │ ( ) < > [ ] { } / %                       │
//! │ digit        │ 0-9                                       │
//! │ numeric      │ 0-9 + - .                                 │
//! └──────────────┴───────────────────────────────────────────┘
//! ```

use crate::cursor::ByteCursor;
use crate::error::WireError;

#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, 0x00 | b'\t' | b'\n' | 0x0C | b'\r' | b' ')
}

#[must_use]
pub fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

#[must_use]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

#[must_use]
pub fn is_numeric(byte: u8) -> bool {
    is_digit(byte) || matches!(byte, b'+' | b'-' | b'.')
}

/// Bytes that end a regular token (names, keywords, numbers).
#[must_use]
pub fn is_token_boundary(byte: u8) -> bool {
    is_whitespace(byte) || is_delimiter(byte)
}

pub fn skip_whitespace(cursor: &mut ByteCursor<'_>) {
    while cursor.peek().is_some_and(is_whitespace) {
        cursor.next();
    }
}

/// Skip a `%` comment up to (not including) the end-of-line byte.
///
/// Returns `false` without moving if the cursor is not on a comment.
pub fn skip_comment(cursor: &mut ByteCursor<'_>) -> bool {
    if cursor.peek() != Some(b'%') {
        return false;
    }
    while let Some(byte) = cursor.peek() {
        if byte == b'\n' || byte == b'\r' {
            break;
        }
        cursor.next();
    }
    true
}

pub fn skip_whitespace_and_comments(cursor: &mut ByteCursor<'_>) {
    skip_whitespace(cursor);
    while skip_comment(cursor) {
        skip_whitespace(cursor);
    }
}

/// Parse an unsigned decimal integer made only of ASCII digits.
///
/// No sign, no fraction. This is the token form used by object stream
/// headers.
///
/// # Errors
///
/// Returns [`WireError::InvalidInteger`] if there are no digits at the
/// cursor or the value does not fit in a `u64`.
pub fn parse_raw_int(cursor: &mut ByteCursor<'_>) -> Result<u64, WireError> {
    let start = cursor.offset();
    while cursor.peek().is_some_and(is_digit) {
        cursor.next();
    }
    let token = cursor.slice(start..cursor.offset());

    // Digits are ASCII, so the conversion cannot fail.
    let text = std::str::from_utf8(token).unwrap_or_default();
    text.parse::<u64>().map_err(|_| WireError::InvalidInteger {
        offset: start,
        token: text.to_owned(),
    })
}

/// A numeric literal together with the text it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct RawNumber {
    pub value: f64,
    pub token: String,
}

impl RawNumber {
    /// `true` if the literal had no fractional part or decimal point.
    #[must_use]
    pub fn is_integer_literal(&self) -> bool {
        !self.token.contains('.')
    }

    /// The value as a non-negative integer, if it is written as one.
    #[must_use]
    pub fn as_unsigned(&self) -> Option<u64> {
        if self.is_integer_literal() && !self.token.starts_with('-') {
            self.token.trim_start_matches('+').parse().ok()
        } else {
            None
        }
    }
}

/// Parse a PDF numeric literal: `123`, `-4`, `+17`, `3.14`, `-.002`, `4.`.
///
/// The integer part may contain sign characters and stops after the
/// first `.`; the fractional part is digits only.
///
/// # Errors
///
/// Returns [`WireError::InvalidNumber`] if no numeric bytes are present or
/// the collected text is not a number (e.g. `-`, `.`, `+-1`).
///
/// A literal too large for `f64` is not an error: it comes back as
/// `±inf` and the caller decides what to do with its magnitude.
pub fn parse_raw_number(cursor: &mut ByteCursor<'_>) -> Result<RawNumber, WireError> {
    let start = cursor.offset();

    // Integer part, including an optional leading sign and a single period.
    while let Some(byte) = cursor.peek() {
        if !is_numeric(byte) {
            break;
        }
        cursor.next();
        if byte == b'.' {
            break;
        }
    }

    // Fractional part.
    while cursor.peek().is_some_and(is_digit) {
        cursor.next();
    }

    let token = String::from_utf8_lossy(cursor.slice(start..cursor.offset())).into_owned();
    match token.parse::<f64>() {
        Ok(value) => Ok(RawNumber { value, token }),
        Err(_) => Err(WireError::InvalidNumber {
            offset: start,
            token,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(input: &[u8]) -> Result<RawNumber, WireError> {
        parse_raw_number(&mut ByteCursor::new(input))
    }

    #[test]
    fn character_classes() {
        for byte in [0x00, b'\t', b'\n', 0x0C, b'\r', b' '] {
            assert!(is_whitespace(byte), "{byte:#04x} should be whitespace");
        }
        assert!(!is_whitespace(b'a'));
        for byte in *b"()<>[]{}/%" {
            assert!(is_delimiter(byte));
        }
        assert!(is_numeric(b'.'));
        assert!(is_numeric(b'-'));
        assert!(!is_digit(b'+'));
    }

    #[test]
    fn skips_whitespace_and_comments() {
        let mut cursor = ByteCursor::new(b"  % a comment\r\n\t%another\n 12");
        skip_whitespace_and_comments(&mut cursor);
        assert_eq!(cursor.peek(), Some(b'1'));
    }

    #[test]
    fn comment_at_end_of_input() {
        let mut cursor = ByteCursor::new(b" % trailing");
        skip_whitespace_and_comments(&mut cursor);
        assert!(cursor.is_done());
    }

    #[test]
    fn skip_comment_only_on_percent() {
        let mut cursor = ByteCursor::new(b"x%");
        assert!(!skip_comment(&mut cursor));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn raw_int_stops_at_non_digit() {
        let mut cursor = ByteCursor::new(b"1234 56");
        assert_eq!(parse_raw_int(&mut cursor).unwrap(), 1234);
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn raw_int_rejects_sign() {
        let mut cursor = ByteCursor::new(b"-3");
        let err = parse_raw_int(&mut cursor).unwrap_err();
        assert!(matches!(err, WireError::InvalidInteger { offset: 0, .. }));
    }

    #[test]
    fn raw_int_rejects_overflow() {
        let mut cursor = ByteCursor::new(b"99999999999999999999999");
        assert!(matches!(
            parse_raw_int(&mut cursor),
            Err(WireError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn raw_int_at_eof() {
        let mut cursor = ByteCursor::new(b"");
        assert!(matches!(
            parse_raw_int(&mut cursor),
            Err(WireError::InvalidInteger { offset: 0, .. })
        ));
    }

    #[test]
    fn numbers_in_all_forms() {
        assert_eq!(number(b"42").unwrap().value, 42.0);
        assert_eq!(number(b"-17").unwrap().value, -17.0);
        assert_eq!(number(b"+5").unwrap().value, 5.0);
        assert_eq!(number(b"3.25").unwrap().value, 3.25);
        assert_eq!(number(b"-.5").unwrap().value, -0.5);
        assert_eq!(number(b"4.").unwrap().value, 4.0);
    }

    #[test]
    fn number_stops_after_second_period() {
        let mut cursor = ByteCursor::new(b"1.5.2");
        let n = parse_raw_number(&mut cursor).unwrap();
        assert_eq!(n.value, 1.5);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn number_beyond_f64_is_infinite() {
        let digits = "9".repeat(400);
        let n = number(digits.as_bytes()).unwrap();
        assert_eq!(n.value, f64::INFINITY);
        assert_eq!(n.token, digits);

        let negative = format!("-{digits}");
        assert_eq!(number(negative.as_bytes()).unwrap().value, f64::NEG_INFINITY);
    }

    #[test]
    fn number_rejects_lone_sign() {
        assert!(matches!(number(b"-"), Err(WireError::InvalidNumber { .. })));
        assert!(matches!(number(b"."), Err(WireError::InvalidNumber { .. })));
        assert!(matches!(number(b"abc"), Err(WireError::InvalidNumber { .. })));
    }

    #[test]
    fn integer_literal_detection() {
        assert_eq!(number(b"12").unwrap().as_unsigned(), Some(12));
        assert_eq!(number(b"+12").unwrap().as_unsigned(), Some(12));
        assert_eq!(number(b"-12").unwrap().as_unsigned(), None);
        assert_eq!(number(b"12.0").unwrap().as_unsigned(), None);
    }
}
