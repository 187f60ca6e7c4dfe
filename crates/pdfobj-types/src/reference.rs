use std::fmt;

/// Identifier of an indirect object: object number plus generation.
///
/// Members of an object stream always have generation 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjRef {
  pub object_number: u32,
  pub generation: u16,
}

impl ObjRef {
  #[must_use]
  pub const fn new(object_number: u32, generation: u16) -> Self {
    Self {
      object_number,
      generation,
    }
  }

  /// Reference with generation 0.
  #[must_use]
  pub const fn of(object_number: u32) -> Self {
    Self::new(object_number, 0)
  }
}

impl fmt::Display for ObjRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} R", self.object_number, self.generation)
  }
}
