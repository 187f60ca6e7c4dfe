use pdfobj_types::{ObjRef, ObjectStore, PdfDict, PdfName, TypeError};

use crate::error::DecodeError;

/// The two numbers an object stream's dictionary contributes to decoding,
/// plus the optional stream it extends.
///
/// ```text
///   << /Type /ObjStm /N 2 /First 9 /Extends 40 0 R >>
///                       │        │           │
///                       count    first       extends
/// ```
///
/// Fixed for the lifetime of one decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectStreamDescriptor {
    /// Byte position of the first member, relative to the start of the
    /// decoded stream data.
    pub first: usize,

    /// Number of header entries.
    pub count: usize,

    /// Another object stream this one extends, if any. Decoding does not
    /// use it.
    pub extends: Option<ObjRef>,
}

impl ObjectStreamDescriptor {
    #[must_use]
    pub fn new(first: usize, count: usize) -> Self {
        Self {
            first,
            count,
            extends: None,
        }
    }

    /// Read `/First`, `/N` and `/Extends` from a stream dictionary.
    ///
    /// `/First` and `/N` may be given indirectly; they are resolved
    /// through `store`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidDescriptor`] if `/First` or `/N` is missing,
    /// not a number, negative or fractional, if `/Extends` is present
    /// but not a reference, or if `/Type` is present but not `/ObjStm`.
    pub fn from_dict(dict: &PdfDict, store: &dyn ObjectStore) -> Result<Self, DecodeError> {
        // `/Type` is required by the format but often omitted by writers.
        if dict.contains_key("Type") {
            let found = dict.lookup_name("Type", store)?;
            if found.as_bytes() != b"ObjStm" {
                return Err(TypeError::UnexpectedName {
                    key: "Type".to_owned(),
                    expected: PdfName::new("ObjStm"),
                    found,
                }
                .into());
            }
        }

        Ok(Self {
            first: dict.lookup_unsigned("First", store)?,
            count: dict.lookup_unsigned("N", store)?,
            extends: dict.get_reference("Extends")?,
        })
    }
}
