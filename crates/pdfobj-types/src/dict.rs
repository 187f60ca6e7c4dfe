use std::collections::BTreeMap;
use std::fmt;

use crate::error::TypeError;
use crate::graph::ObjectStore;
use crate::name::PdfName;
use crate::object::{ObjectKind, PdfObject};

/// A PDF dictionary: name keys to values.
///
/// Key order on the wire carries no meaning, so entries are kept sorted,
/// which also makes the diagnostic rendering deterministic. Inserting an
/// existing key replaces its value (the last occurrence wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PdfDict {
  entries: BTreeMap<PdfName, PdfObject>,
}

impl PdfDict {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, key: impl Into<PdfName>, value: PdfObject) -> Option<PdfObject> {
    self.entries.insert(key.into(), value)
  }

  /// The raw value stored under `key`, without resolving references.
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&PdfObject> {
    self.entries.get(&PdfName::new(key))
  }

  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&PdfName, &PdfObject)> {
    self.entries.iter()
  }

  /// Look up `key`, following indirect references through `store`.
  ///
  /// A reference to an object the store does not (yet) hold resolves to
  /// `None`, as does an explicit `null`. Reference chains are followed
  /// up to a fixed depth so a cycle cannot loop forever.
  #[must_use]
  pub fn lookup(&self, key: &str, store: &dyn ObjectStore) -> Option<PdfObject> {
    const MAX_HOPS: usize = 32;

    let mut value = self.get(key)?.clone();
    for _ in 0..MAX_HOPS {
      match value {
        PdfObject::Reference(r) => value = store.lookup(r)?,
        PdfObject::Null => return None,
        other => return Some(other),
      }
    }
    None
  }

  /// Look up a required number.
  ///
  /// # Errors
  ///
  /// - [`TypeError::MissingKey`] if absent or unresolvable.
  /// - [`TypeError::UnexpectedObjectType`] if not a number.
  pub fn lookup_number(&self, key: &str, store: &dyn ObjectStore) -> Result<f64, TypeError> {
    self.require(key, store)?.as_number()
  }

  /// Look up a required number that must be a non-negative integer.
  ///
  /// # Errors
  ///
  /// As [`lookup_number`](Self::lookup_number), plus
  /// [`TypeError::InvalidInteger`] for negative, fractional or
  /// oversized values.
  #[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
  )]
  pub fn lookup_unsigned(&self, key: &str, store: &dyn ObjectStore) -> Result<usize, TypeError> {
    let value = self.lookup_number(key, store)?;
    if value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
      Ok(value as usize)
    } else {
      Err(TypeError::InvalidInteger {
        key: key.to_owned(),
        value,
      })
    }
  }

  /// Look up a required name.
  ///
  /// # Errors
  ///
  /// [`TypeError::MissingKey`] or [`TypeError::UnexpectedObjectType`].
  pub fn lookup_name(&self, key: &str, store: &dyn ObjectStore) -> Result<PdfName, TypeError> {
    self.require(key, store)?.as_name().cloned()
  }

  /// The raw reference stored under `key`, if it is one.
  ///
  /// # Errors
  ///
  /// [`TypeError::UnexpectedObjectType`] if the key holds something else.
  pub fn get_reference(&self, key: &str) -> Result<Option<crate::ObjRef>, TypeError> {
    match self.get(key) {
      None | Some(PdfObject::Null) => Ok(None),
      Some(PdfObject::Reference(r)) => Ok(Some(*r)),
      Some(other) => Err(TypeError::UnexpectedObjectType {
        expected: ObjectKind::Reference,
        found: other.kind(),
      }),
    }
  }

  fn require(&self, key: &str, store: &dyn ObjectStore) -> Result<PdfObject, TypeError> {
    self.lookup(key, store).ok_or_else(|| TypeError::MissingKey {
      key: key.to_owned(),
    })
  }
}

impl FromIterator<(PdfName, PdfObject)> for PdfDict {
  fn from_iter<I: IntoIterator<Item = (PdfName, PdfObject)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl fmt::Display for PdfDict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("<<")?;
    for (key, value) in &self.entries {
      write!(f, " {key} {value}")?;
    }
    f.write_str(" >>")
  }
}
