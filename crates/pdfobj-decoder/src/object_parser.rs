use pdfobj_types::{ObjRef, PdfDict, PdfName, PdfObject, PdfString};
use pdfobj_wire::ByteCursor;
use pdfobj_wire::lexer::{
    is_digit, is_numeric, is_token_boundary, parse_raw_number, skip_whitespace_and_comments,
    RawNumber,
};
use tracing::warn;

use crate::config::ParserConfig;
use crate::error::ParseError;

/// Recursive-descent parser for a single PDF value.
///
/// The parser owns a [`ByteCursor`] and reads exactly one value per
/// [`parse_object`](Self::parse_object) call, starting wherever the
/// cursor currently points. Callers that jump around a buffer (like the
/// object stream decoder) reposition the cursor between calls through
/// [`cursor_mut`](Self::cursor_mut).
///
/// References (`12 0 R`) are produced as plain [`ObjRef`] values; the
/// parser never consults an object store, so a reference to an object
/// that does not exist yet parses fine.
///
/// # Dispatch
///
/// ```text
///   true / false / null  → keyword
///   <<                   → dictionary (stream keyword after it is an error)
///   <                    → hex string
///   (                    → literal string
///   /                    → name
///   [                    → array
///   + - . 0-9            → number, or reference if `N G R` follows
///   anything else        → ParseError::UnexpectedByte
/// ```
pub struct ObjectParser<'a> {
    cursor: ByteCursor<'a>,
    config: ParserConfig,
    number_too_large: bool,
}

impl<'a> ObjectParser<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_config(bytes, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(bytes: &'a [u8], config: ParserConfig) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            config,
            number_too_large: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ParserConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn cursor(&self) -> &ByteCursor<'a> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut ByteCursor<'a> {
        &mut self.cursor
    }

    /// `true` if the last [`parse_object`](Self::parse_object) call
    /// produced a number whose magnitude exceeds
    /// [`ParserConfig::number_limit`].
    ///
    /// This is a warning, not an error: the value was still parsed.
    #[must_use]
    pub fn number_too_large(&self) -> bool {
        self.number_too_large
    }

    /// Parse one value at the current cursor position.
    ///
    /// Leading whitespace and comments are skipped. On success the cursor
    /// sits right after the value (for dictionaries, after any whitespace
    /// that follows it).
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] variant; the cursor position is unspecified
    /// afterwards.
    pub fn parse_object(&mut self) -> Result<PdfObject, ParseError> {
        self.number_too_large = false;
        self.parse_value(0)
    }

    fn parse_value(&mut self, depth: usize) -> Result<PdfObject, ParseError> {
        skip_whitespace_and_comments(&mut self.cursor);
        let offset = self.cursor.offset();

        if depth > self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset,
                max_depth: self.config.max_depth,
            });
        }

        if self.match_token(b"true") {
            return Ok(PdfObject::Bool(true));
        }
        if self.match_token(b"false") {
            return Ok(PdfObject::Bool(false));
        }
        if self.match_token(b"null") {
            return Ok(PdfObject::Null);
        }

        match self.cursor.peek() {
            None => Err(ParseError::UnexpectedEof { offset }),
            Some(b'<') if self.cursor.peek_ahead(1) == Some(b'<') => {
                self.parse_dict_or_stream(depth)
            }
            Some(b'<') => self.parse_hex_string(),
            Some(b'(') => self.parse_literal_string(),
            Some(b'/') => Ok(PdfObject::Name(self.parse_name()?)),
            Some(b'[') => self.parse_array(depth),
            Some(byte) if is_numeric(byte) => self.parse_number_or_ref(),
            Some(found) => Err(ParseError::UnexpectedByte { offset, found }),
        }
    }

    /// Consume `keyword` only if it is a whole token.
    fn match_token(&mut self, keyword: &[u8]) -> bool {
        let start = self.cursor.offset();
        if !self.cursor.match_keyword(keyword) {
            return false;
        }
        if self.cursor.peek().is_none_or(is_token_boundary) {
            return true;
        }
        self.cursor.rewind(start);
        false
    }

    fn parse_dict_or_stream(&mut self, depth: usize) -> Result<PdfObject, ParseError> {
        let offset = self.cursor.offset();
        let dict = self.parse_dict(depth)?;

        skip_whitespace_and_comments(&mut self.cursor);
        if self.match_token(b"stream") {
            return Err(ParseError::NestedStream { offset });
        }
        Ok(PdfObject::Dictionary(dict))
    }

    fn parse_dict(&mut self, depth: usize) -> Result<PdfDict, ParseError> {
        self.cursor.assert_next(b'<')?;
        self.cursor.assert_next(b'<')?;
        skip_whitespace_and_comments(&mut self.cursor);

        let mut dict = PdfDict::new();
        loop {
            let offset = self.cursor.offset();
            match self.cursor.peek() {
                None => return Err(ParseError::UnexpectedEof { offset }),
                Some(b'>') => break,
                Some(b'/') => {
                    let key = self.parse_name()?;
                    let value = self.parse_value(depth + 1)?;
                    dict.insert(key, value);
                }
                Some(found) => return Err(ParseError::UnexpectedByte { offset, found }),
            }
            skip_whitespace_and_comments(&mut self.cursor);
        }

        self.cursor.assert_next(b'>')?;
        self.cursor.assert_next(b'>')?;
        Ok(dict)
    }

    fn parse_array(&mut self, depth: usize) -> Result<PdfObject, ParseError> {
        self.cursor.assert_next(b'[')?;
        skip_whitespace_and_comments(&mut self.cursor);

        let mut items = Vec::new();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(ParseError::UnexpectedEof {
                        offset: self.cursor.offset(),
                    });
                }
                Some(b']') => break,
                Some(_) => items.push(self.parse_value(depth + 1)?),
            }
            skip_whitespace_and_comments(&mut self.cursor);
        }

        self.cursor.assert_next(b']')?;
        Ok(PdfObject::Array(items))
    }

    fn parse_name(&mut self) -> Result<PdfName, ParseError> {
        self.cursor.assert_next(b'/')?;
        let start = self.cursor.offset();
        while self.cursor.peek().is_some_and(|b| !is_token_boundary(b)) {
            self.cursor.next();
        }
        Ok(PdfName::from_raw(
            self.cursor.slice(start..self.cursor.offset()),
        ))
    }

    fn parse_hex_string(&mut self) -> Result<PdfObject, ParseError> {
        self.cursor.assert_next(b'<')?;
        let start = self.cursor.offset();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(ParseError::UnexpectedEof {
                        offset: self.cursor.offset(),
                    });
                }
                Some(b'>') => break,
                Some(_) => {
                    self.cursor.next();
                }
            }
        }
        let digits = self.cursor.slice(start..self.cursor.offset());
        self.cursor.assert_next(b'>')?;
        Ok(PdfObject::String(PdfString::Hex(
            String::from_utf8_lossy(digits).into_owned(),
        )))
    }

    /// Literal strings nest: `(a (b) c)` is one string. A backslash
    /// escapes the next byte, including parentheses and itself.
    fn parse_literal_string(&mut self) -> Result<PdfObject, ParseError> {
        let start = self.cursor.offset();
        let mut depth = 0usize;
        let mut escaped = false;

        while let Some(byte) = self.cursor.next() {
            if !escaped {
                match byte {
                    b'(' => depth += 1,
                    b')' => depth -= 1,
                    _ => {}
                }
            }
            escaped = byte == b'\\' && !escaped;

            if depth == 0 {
                let raw = self.cursor.slice(start + 1..self.cursor.offset() - 1);
                return Ok(PdfObject::String(PdfString::Literal(raw.to_vec())));
            }
        }

        Err(ParseError::UnbalancedParenthesis { offset: start })
    }

    /// Parse `N`, or `N G R` when the lookahead matches a reference.
    ///
    /// After the first number the parser peeks for a second integer and
    /// an `R`. If either is missing, or the numbers cannot be an object
    /// number and generation, it backtracks and returns just `N`.
    fn parse_number_or_ref(&mut self) -> Result<PdfObject, ParseError> {
        let offset = self.cursor.offset();
        let first = parse_raw_number(&mut self.cursor)?;

        skip_whitespace_and_comments(&mut self.cursor);
        let lookahead = self.cursor.offset();

        if self.cursor.peek().is_some_and(is_digit) {
            let second = parse_raw_number(&mut self.cursor)?;
            skip_whitespace_and_comments(&mut self.cursor);

            if let Some(r) = as_reference(&first, &second)
                && self.cursor.peek() == Some(b'R')
                && self.cursor.peek_ahead(1).is_none_or(is_token_boundary)
            {
                self.cursor.next();
                return Ok(PdfObject::Reference(r));
            }
        }

        self.cursor.rewind(lookahead);
        Ok(PdfObject::Number(self.check_magnitude(&first, offset)))
    }

    fn check_magnitude(&mut self, number: &RawNumber, offset: usize) -> f64 {
        let limit = self.config.number_limit;
        if number.value.abs() <= limit {
            return number.value;
        }

        self.number_too_large = true;
        if self.config.cap_numbers {
            warn!(
                offset,
                token = %number.token,
                limit,
                "number exceeds safe magnitude; capping"
            );
            limit.copysign(number.value)
        } else {
            warn!(
                offset,
                token = %number.token,
                limit,
                "number exceeds safe magnitude; precision may be lost"
            );
            number.value
        }
    }
}

fn as_reference(first: &RawNumber, second: &RawNumber) -> Option<ObjRef> {
    let object_number = u32::try_from(first.as_unsigned()?).ok()?;
    let generation = u16::try_from(second.as_unsigned()?).ok()?;
    Some(ObjRef::new(object_number, generation))
}
