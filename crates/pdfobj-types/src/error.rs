use crate::name::PdfName;
use crate::object::ObjectKind;

/// Errors raised by typed lookups on decoded values.
///
/// These sit above [`pdfobj_wire::WireError`]: they never concern bytes,
/// only the shape of values that were already parsed.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                               │
/// │   ├── MissingKey           key absent from dict      │
/// │   ├── UnexpectedObjectType value has the wrong kind  │
/// │   ├── UnexpectedName       name is not the one       │
/// │                            the key requires          │
/// │   └── InvalidInteger       number is not a usable    │
/// │                            non-negative integer      │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
  /// A required dictionary key was not present (or resolved to null).
  #[error("missing required key /{key}")]
  MissingKey { key: String },

  /// A value was found but has the wrong kind.
  #[error("expected {expected}, found {found}")]
  UnexpectedObjectType {
    expected: ObjectKind,
    found: ObjectKind,
  },

  /// A name-valued key holds a different name than required.
  #[error("/{key} must be {expected}, found {found}")]
  UnexpectedName {
    key: String,
    expected: PdfName,
    found: PdfName,
  },

  /// A number was required to be a non-negative integer.
  #[error("value of /{key} must be a non-negative integer, found {value}")]
  InvalidInteger { key: String, value: f64 },
}
