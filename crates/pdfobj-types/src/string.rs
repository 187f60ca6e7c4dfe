use std::fmt;

/// A PDF string object in its on-wire form.
///
/// The parser keeps strings raw: a literal string holds the bytes
/// between its outermost parentheses with escape sequences untouched,
/// a hex string holds the hex digits between `<` and `>`. Use
/// [`decoded_bytes`](Self::decoded_bytes) to get the actual content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PdfString {
  /// `(...)`: raw bytes, escapes preserved.
  Literal(Vec<u8>),
  /// `<...>`: raw hex digits, whitespace preserved.
  Hex(String),
}

impl PdfString {
  /// Decode escapes (literal) or hex pairs (hex) into content bytes.
  ///
  /// Literal escapes: `\n \r \t \b \f \( \) \\`, octal `\ddd` (1–3
  /// digits), and a backslash before an end-of-line marks a line
  /// continuation. An unknown escape drops the backslash.
  ///
  /// Hex: non-hex bytes are ignored, an odd final digit is padded with 0.
  #[must_use]
  pub fn decoded_bytes(&self) -> Vec<u8> {
    match self {
      Self::Literal(raw) => decode_literal(raw),
      Self::Hex(digits) => decode_hex(digits),
    }
  }
}

fn decode_literal(raw: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(raw.len());
  let mut i = 0;
  while i < raw.len() {
    let byte = raw[i];
    i += 1;
    if byte != b'\\' {
      out.push(byte);
      continue;
    }
    let Some(&escaped) = raw.get(i) else {
      break;
    };
    i += 1;
    match escaped {
      b'n' => out.push(b'\n'),
      b'r' => out.push(b'\r'),
      b't' => out.push(b'\t'),
      b'b' => out.push(0x08),
      b'f' => out.push(0x0C),
      b'0'..=b'7' => {
        let mut value = u32::from(escaped - b'0');
        for _ in 0..2 {
          match raw.get(i) {
            Some(&d @ b'0'..=b'7') => {
              value = value * 8 + u32::from(d - b'0');
              i += 1;
            }
            _ => break,
          }
        }
        // High-order overflow is ignored, as in `\777`.
        out.push(u8::try_from(value % 256).unwrap_or_default());
      }
      b'\r' => {
        if raw.get(i) == Some(&b'\n') {
          i += 1;
        }
      }
      b'\n' => {}
      other => out.push(other),
    }
  }
  out
}

fn decode_hex(digits: &str) -> Vec<u8> {
  let nibbles: Vec<u8> = digits
    .bytes()
    .filter_map(|b| char::from(b).to_digit(16))
    .map(|d| u8::try_from(d).unwrap_or_default())
    .collect();
  nibbles
    .chunks(2)
    .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
    .collect()
}

impl fmt::Display for PdfString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(raw) => write!(f, "({})", String::from_utf8_lossy(raw)),
      Self::Hex(digits) => write!(f, "<{digits}>"),
    }
  }
}
