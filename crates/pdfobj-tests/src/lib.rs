//! Fixture builder for object stream tests and benchmarks.
//!
//! Lays out object stream data the way a PDF writer would:
//!
//! ```text
//! ┌──────────────────────┬─────────┬──────────────────────────────┐
//! │ header               │ padding │ bodies, newline separated    │
//! │ 1 0 2 17 3 40\n      │ "   "   │ << ... >>\n[ ... ]\n(...)\n   │
//! └──────────────────────┴─────────┴──────────────────────────────┘
//!                                  ^ /First
//! ```

use pdfobj_decoder::ObjectStreamDescriptor;

/// Builder for object stream data.
///
/// ```rust
/// use pdfobj_tests::ObjectStreamFixture;
///
/// let stream = ObjectStreamFixture::new()
///     .object(5, "<< /Type /Catalog >>")
///     .object(7, "42")
///     .build();
///
/// assert_eq!(stream.count, 2);
/// assert_eq!(&stream.data[stream.first..stream.first + 2], b"<<");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ObjectStreamFixture {
    objects: Vec<(u32, String)>,
    header_entries: Vec<(u64, u64)>,
    padding: usize,
}

/// Laid-out object stream data plus the values its dictionary would carry.
#[derive(Clone, Debug)]
pub struct BuiltStream {
    pub data: Vec<u8>,
    pub first: usize,
    pub count: usize,
    /// Offset of each body relative to `first`, in insertion order.
    pub offsets: Vec<usize>,
}

impl ObjectStreamFixture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object with the given number and PDF source.
    #[must_use]
    pub fn object(mut self, number: u32, source: impl Into<String>) -> Self {
        self.objects.push((number, source.into()));
        self
    }

    /// Append a header entry that has no body, with a raw offset.
    ///
    /// Used to point entries outside the data.
    #[must_use]
    pub fn dangling_entry(mut self, number: u64, offset: u64) -> Self {
        self.header_entries.push((number, offset));
        self
    }

    /// Spaces between the header and `/First`.
    #[must_use]
    pub fn padding(mut self, spaces: usize) -> Self {
        self.padding = spaces;
        self
    }

    #[must_use]
    pub fn build(&self) -> BuiltStream {
        let mut body = Vec::new();
        let mut offsets = Vec::with_capacity(self.objects.len());
        let mut header = String::new();

        for (number, source) in &self.objects {
            offsets.push(body.len());
            header.push_str(&format!("{number} {} ", body.len()));
            body.extend_from_slice(source.as_bytes());
            body.push(b'\n');
        }
        for (number, offset) in &self.header_entries {
            header.push_str(&format!("{number} {offset} "));
        }
        header.push('\n');
        header.push_str(&" ".repeat(self.padding));

        let first = header.len();
        let mut data = header.into_bytes();
        data.extend_from_slice(&body);

        BuiltStream {
            data,
            first,
            count: self.objects.len() + self.header_entries.len(),
            offsets,
        }
    }
}

impl BuiltStream {
    #[must_use]
    pub fn descriptor(&self) -> ObjectStreamDescriptor {
        ObjectStreamDescriptor::new(self.first, self.count)
    }

    /// The stream dictionary in PDF syntax.
    #[must_use]
    pub fn dict_source(&self) -> String {
        format!(
            "<< /Type /ObjStm /N {} /First {} /Length {} >>",
            self.count,
            self.first,
            self.data.len()
        )
    }
}

/// A stream of `count` small dictionaries, numbered from 1.
///
/// Shared by the benchmarks and the larger integration tests.
#[must_use]
pub fn page_tree(count: u32) -> BuiltStream {
    (1..=count)
        .fold(ObjectStreamFixture::new(), |fixture, n| {
            fixture.object(
                n,
                format!("<< /Type /Page /Parent 1 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>", n + count),
            )
        })
        .build()
}
