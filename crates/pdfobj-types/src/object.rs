use std::fmt;

use crate::dict::PdfDict;
use crate::error::TypeError;
use crate::name::PdfName;
use crate::reference::ObjRef;
use crate::string::PdfString;

/// A fully parsed PDF value.
///
/// The grammar is closed, so every consumer matches exhaustively. There
/// is deliberately no stream variant: object streams cannot contain
/// streams, and the decoder rejects one if it sees it.
///
/// ```text
/// ┌─────────────┬──────────────────────────────┐
/// │ Variant     │ Wire form                    │
/// ├─────────────┼──────────────────────────────┤
/// │ Null        │ null                         │
/// │ Bool        │ true / false                 │
/// │ Number      │ 42, -1.5, .25                │
/// │ Name        │ /Type                        │
/// │ String      │ (text) or <48656C6C6F>       │
/// │ Array       │ [ ... ]                      │
/// │ Dictionary  │ << /Key value ... >>         │
/// │ Reference   │ 12 0 R                       │
/// └─────────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PdfObject {
  Null,
  Bool(bool),
  Number(f64),
  Name(PdfName),
  String(PdfString),
  Array(Vec<PdfObject>),
  Dictionary(PdfDict),
  Reference(ObjRef),
}

/// The variant tag of a [`PdfObject`], used in type errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
  Null,
  Bool,
  Number,
  Name,
  String,
  Array,
  Dictionary,
  Reference,
}

impl fmt::Display for ObjectKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Self::Null => "null",
      Self::Bool => "boolean",
      Self::Number => "number",
      Self::Name => "name",
      Self::String => "string",
      Self::Array => "array",
      Self::Dictionary => "dictionary",
      Self::Reference => "reference",
    };
    f.write_str(label)
  }
}

impl PdfObject {
  #[must_use]
  pub fn kind(&self) -> ObjectKind {
    match self {
      Self::Null => ObjectKind::Null,
      Self::Bool(_) => ObjectKind::Bool,
      Self::Number(_) => ObjectKind::Number,
      Self::Name(_) => ObjectKind::Name,
      Self::String(_) => ObjectKind::String,
      Self::Array(_) => ObjectKind::Array,
      Self::Dictionary(_) => ObjectKind::Dictionary,
      Self::Reference(_) => ObjectKind::Reference,
    }
  }

  /// Shorthand for `PdfObject::Name(PdfName::new(name))`.
  #[must_use]
  pub fn name(name: &str) -> Self {
    Self::Name(PdfName::new(name))
  }

  /// # Errors
  ///
  /// [`TypeError::UnexpectedObjectType`] if this is not a number.
  pub fn as_number(&self) -> Result<f64, TypeError> {
    match self {
      Self::Number(n) => Ok(*n),
      other => Err(other.unexpected(ObjectKind::Number)),
    }
  }

  /// # Errors
  ///
  /// [`TypeError::UnexpectedObjectType`] if this is not a name.
  pub fn as_name(&self) -> Result<&PdfName, TypeError> {
    match self {
      Self::Name(n) => Ok(n),
      other => Err(other.unexpected(ObjectKind::Name)),
    }
  }

  /// # Errors
  ///
  /// [`TypeError::UnexpectedObjectType`] if this is not a dictionary.
  pub fn as_dict(&self) -> Result<&PdfDict, TypeError> {
    match self {
      Self::Dictionary(d) => Ok(d),
      other => Err(other.unexpected(ObjectKind::Dictionary)),
    }
  }

  fn unexpected(&self, expected: ObjectKind) -> TypeError {
    TypeError::UnexpectedObjectType {
      expected,
      found: self.kind(),
    }
  }
}

impl From<ObjRef> for PdfObject {
  fn from(r: ObjRef) -> Self {
    Self::Reference(r)
  }
}

impl fmt::Display for PdfObject {
  /// Diagnostic rendering in PDF syntax, single line.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("null"),
      Self::Bool(b) => write!(f, "{b}"),
      Self::Number(n) => write!(f, "{n}"),
      Self::Name(n) => write!(f, "{n}"),
      Self::String(s) => write!(f, "{s}"),
      Self::Array(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(" ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_str("]")
      }
      Self::Dictionary(d) => write!(f, "{d}"),
      Self::Reference(r) => write!(f, "{r}"),
    }
  }
}
