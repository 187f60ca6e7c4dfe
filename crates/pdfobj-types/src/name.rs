use std::fmt;

/// A PDF name object, stored in decoded form.
///
/// On the wire a name may contain `#xx` hex escapes (`/A#20B` is the
/// name `A B`). Escapes are decoded when the name is built from raw
/// bytes; a `#` not followed by two hex digits is kept literally.
///
/// Names are byte sequences, not text: `/A#FF` holds the byte `0xFF`,
/// and [`Display`](fmt::Display) writes it back as `#FF`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PdfName(Vec<u8>);

impl PdfName {
  /// Build a name from already-decoded text.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into().into_bytes())
  }

  /// Build a name from the raw bytes that followed the `/`.
  #[must_use]
  pub fn from_raw(raw: &[u8]) -> Self {
    let mut decoded = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
      if raw[i] == b'#'
        && let Some(byte) = raw.get(i + 1..i + 3).and_then(decode_hex_pair)
      {
        decoded.push(byte);
        i += 3;
        continue;
      }
      decoded.push(raw[i]);
      i += 1;
    }
    Self(decoded)
  }

  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  /// The name as text, or `None` if its bytes are not UTF-8.
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    std::str::from_utf8(&self.0).ok()
  }
}

fn decode_hex_pair(pair: &[u8]) -> Option<u8> {
  let text = std::str::from_utf8(pair).ok()?;
  if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  }
  u8::from_str_radix(text, 16).ok()
}

impl From<&str> for PdfName {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

impl fmt::Display for PdfName {
  /// Renders `/Name`, re-escaping bytes that cannot appear bare.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("/")?;
    for &byte in &self.0 {
      let needs_escape = byte == b'#'
        || !(0x21..=0x7E).contains(&byte)
        || pdfobj_wire::lexer::is_delimiter(byte);
      if needs_escape {
        write!(f, "#{byte:02X}")?;
      } else {
        write!(f, "{}", char::from(byte))?;
      }
    }
    Ok(())
  }
}
