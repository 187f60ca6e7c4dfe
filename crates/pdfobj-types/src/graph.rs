use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::object::PdfObject;
use crate::reference::ObjRef;

/// Shared store of indirect objects for one document.
///
/// Decoders write into the store through [`assign`](Self::assign); any
/// other part of the document model reads from it. References between
/// objects are plain [`ObjRef`] values and are resolved lazily, so an
/// object may point at something that has not been assigned yet.
///
/// All methods take `&self`. Implementations provide their own interior
/// mutability and must be `Send + Sync` so one store can back several
/// readers.
///
/// # Safe-to-modify latch
///
/// The store also carries a one-way flag that starts `true`. Decoders
/// clear it when they meet a value that could not be represented
/// exactly; downstream editors consult it before changing the document.
/// Once cleared it is never set again.
pub trait ObjectStore: Send + Sync {
  /// Insert or replace the object stored under `r`.
  fn assign(&self, r: ObjRef, object: PdfObject);

  /// Clone of the object stored under `r`, if any.
  fn lookup(&self, r: ObjRef) -> Option<PdfObject>;

  /// `true` until [`mark_unsafe_to_modify`](Self::mark_unsafe_to_modify)
  /// has been called once.
  fn is_safe_to_modify(&self) -> bool;

  /// Clear the safe-to-modify latch. Idempotent.
  fn mark_unsafe_to_modify(&self);
}

/// In-memory [`ObjectStore`] backed by a `HashMap`.
///
/// Pass it around by reference (`&graph`) or share it with
/// `Arc<ObjectGraph>`; there is no global instance, so each document or
/// test owns its own graph.
///
/// # Example
///
/// ```rust
/// use pdfobj_types::{ObjRef, ObjectGraph, ObjectStore, PdfObject};
///
/// let graph = ObjectGraph::new();
/// graph.assign(ObjRef::of(7), PdfObject::Number(42.0));
/// assert_eq!(graph.lookup(ObjRef::of(7)), Some(PdfObject::Number(42.0)));
/// assert_eq!(graph.next_ref(), ObjRef::of(8));
/// assert!(graph.is_safe_to_modify());
/// ```
pub struct ObjectGraph {
  objects: RwLock<HashMap<ObjRef, PdfObject>>,
  largest_object_number: AtomicU32,
  safe_to_modify: AtomicBool,
}

/// Point-in-time copy of a graph's objects, for callers that need to
/// undo a failed decode.
///
/// The latch is not part of the snapshot: it is one-way and survives a
/// restore.
#[derive(Clone, Debug)]
pub struct GraphSnapshot {
  objects: HashMap<ObjRef, PdfObject>,
  largest_object_number: u32,
}

impl ObjectGraph {
  #[must_use]
  pub fn new() -> Self {
    Self {
      objects: RwLock::new(HashMap::new()),
      largest_object_number: AtomicU32::new(0),
      safe_to_modify: AtomicBool::new(true),
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.objects.read().expect("object graph lock poisoned").len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  #[must_use]
  pub fn contains(&self, r: ObjRef) -> bool {
    self
      .objects
      .read()
      .expect("object graph lock poisoned")
      .contains_key(&r)
  }

  /// Highest object number ever assigned, or 0 for an empty graph.
  #[must_use]
  pub fn largest_object_number(&self) -> u32 {
    self.largest_object_number.load(Ordering::Acquire)
  }

  /// The first unused reference after the largest assigned number.
  #[must_use]
  pub fn next_ref(&self) -> ObjRef {
    ObjRef::of(self.largest_object_number().saturating_add(1))
  }

  /// All objects, sorted by reference.
  #[must_use]
  pub fn enumerate(&self) -> Vec<(ObjRef, PdfObject)> {
    let objects = self.objects.read().expect("object graph lock poisoned");
    let mut entries: Vec<_> = objects.iter().map(|(r, o)| (*r, o.clone())).collect();
    entries.sort_by_key(|(r, _)| *r);
    entries
  }

  #[must_use]
  pub fn snapshot(&self) -> GraphSnapshot {
    GraphSnapshot {
      objects: self.objects.read().expect("object graph lock poisoned").clone(),
      largest_object_number: self.largest_object_number(),
    }
  }

  /// Replace the current objects with a previously taken snapshot.
  pub fn restore(&self, snapshot: GraphSnapshot) {
    let mut objects = self.objects.write().expect("object graph lock poisoned");
    *objects = snapshot.objects;
    self
      .largest_object_number
      .store(snapshot.largest_object_number, Ordering::Release);
  }
}

impl Default for ObjectGraph {
  fn default() -> Self {
    Self::new()
  }
}

impl ObjectStore for ObjectGraph {
  fn assign(&self, r: ObjRef, object: PdfObject) {
    let mut objects = self.objects.write().expect("object graph lock poisoned");
    objects.insert(r, object);
    self
      .largest_object_number
      .fetch_max(r.object_number, Ordering::AcqRel);
  }

  fn lookup(&self, r: ObjRef) -> Option<PdfObject> {
    self
      .objects
      .read()
      .expect("object graph lock poisoned")
      .get(&r)
      .cloned()
  }

  fn is_safe_to_modify(&self) -> bool {
    self.safe_to_modify.load(Ordering::Acquire)
  }

  fn mark_unsafe_to_modify(&self) {
    self.safe_to_modify.store(false, Ordering::Release);
  }
}
