use pdfobj_types::{ObjRef, ObjectStore, PdfDict};
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::descriptor::ObjectStreamDescriptor;
use crate::error::DecodeError;
use crate::header::{self, HeaderEntry};
use crate::object_parser::ObjectParser;
use crate::yield_policy::YieldPolicy;

/// Lifecycle of an [`ObjectStreamParser`].
///
/// ```text
///   NotStarted → Decoding → Completed
/// ```
///
/// The move to `Decoding` happens before any fallible work, so a decoder
/// whose decode failed stays in `Decoding` and can never run again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeState {
    NotStarted,
    Decoding,
    Completed,
}

/// What a successful decode did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Objects assigned to the store, one per header entry.
    pub objects: usize,

    /// Times the decoder handed control back to the scheduler.
    pub yields: usize,

    /// At least one member contained a number above the magnitude limit.
    pub number_too_large: bool,
}

/// One-shot decoder for a PDF object stream (`/Type /ObjStm`).
///
/// An object stream packs many indirect objects into one stream's data.
/// The data starts with a header of `count` integer pairs, followed at
/// byte `first` by the objects themselves:
///
/// ```text
/// ┌───────────────────────────────┬──────────────────────────────────┐
/// │ header (offset 0)             │ objects (offset `first`)         │
/// │ 5 0 7 21                      │ << /Type /Catalog >> 42          │
/// │ │ │ │ └ obj 7 at first+21     │ ^ first+0            ^ first+21  │
/// │ │ │ └── obj 7                 │                                  │
/// │ │ └──── obj 5 at first+0      │                                  │
/// │ └────── obj 5                 │                                  │
/// └───────────────────────────────┴──────────────────────────────────┘
/// ```
///
/// Decoding proceeds in three steps:
///
///   1. **Header**: read the `(object number, offset)` table.
///   2. **Objects**: for each entry in header order, seek to
///      `first + offset`, parse one value, and assign it to the store as
///      `object_number 0 R`. A later entry with the same object number
///      replaces an earlier one. When a value contained a number too large
///      to represent exactly, the store's safe-to-modify latch is cleared.
///   3. **Yield**: between entries the async [`decode`](Self::decode)
///      consults its [`YieldPolicy`] and may yield to the runtime.
///
/// Any error aborts the loop. Objects assigned before the failure stay in
/// the store; take an [`ObjectGraph::snapshot`] first if that matters.
///
/// [`ObjectGraph::snapshot`]: pdfobj_types::ObjectGraph::snapshot
///
/// # Example
///
/// ```rust
/// use pdfobj_decoder::{ObjectStreamDescriptor, ObjectStreamParser};
/// use pdfobj_types::{ObjRef, ObjectGraph, ObjectStore, PdfObject};
///
/// let data = b"5 0 7 21            << /Type /Catalog >> 42";
/// let graph = ObjectGraph::new();
/// let mut parser =
///     ObjectStreamParser::new(data, ObjectStreamDescriptor::new(20, 2), &graph);
///
/// let summary = parser.decode_blocking().unwrap();
/// assert_eq!(summary.objects, 2);
/// assert_eq!(graph.lookup(ObjRef::of(7)), Some(PdfObject::Number(42.0)));
/// ```
pub struct ObjectStreamParser<'a> {
    parser: ObjectParser<'a>,
    descriptor: ObjectStreamDescriptor,
    store: &'a dyn ObjectStore,
    yield_policy: YieldPolicy,
    state: DecodeState,
}

impl<'a> ObjectStreamParser<'a> {
    /// Create a decoder over already-decompressed stream data.
    ///
    /// The decoder borrows both the data and the store; it never closes
    /// or clears either.
    #[must_use]
    pub fn new(
        data: &'a [u8],
        descriptor: ObjectStreamDescriptor,
        store: &'a dyn ObjectStore,
    ) -> Self {
        Self {
            parser: ObjectParser::new(data),
            descriptor,
            store,
            yield_policy: YieldPolicy::Never,
            state: DecodeState::NotStarted,
        }
    }

    /// Create a decoder from the stream's dictionary and data.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidDescriptor`] if `/First` or `/N` is unusable.
    pub fn for_dict(
        data: &'a [u8],
        dict: &PdfDict,
        store: &'a dyn ObjectStore,
    ) -> Result<Self, DecodeError> {
        let descriptor = ObjectStreamDescriptor::from_dict(dict, store)?;
        Ok(Self::new(data, descriptor, store))
    }

    #[must_use]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.parser.set_config(config.parser);
        self.yield_policy = config.yield_policy;
        self
    }

    #[must_use]
    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    #[must_use]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    #[must_use]
    pub fn descriptor(&self) -> &ObjectStreamDescriptor {
        &self.descriptor
    }

    /// Decode every member into the store, yielding between entries as
    /// the [`YieldPolicy`] decides.
    ///
    /// Dropping the returned future at a yield point cancels the decode;
    /// objects assigned so far remain in the store and the decoder stays
    /// in [`DecodeState::Decoding`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Reparse`] if this decoder was already started.
    ///   Nothing else happens in that case.
    /// - [`DecodeError::MalformedHeader`] if the header table is bad.
    /// - [`DecodeError::OffsetOutOfRange`] if an entry points outside the
    ///   data.
    /// - [`DecodeError::ObjectParse`] if a member fails to parse.
    pub async fn decode(&mut self) -> Result<DecodeSummary, DecodeError> {
        let entries = self.begin()?;
        let mut summary = DecodeSummary::default();
        let last = entries.len().saturating_sub(1);

        for (index, &entry) in entries.iter().enumerate() {
            self.decode_entry(index, entry, &mut summary)?;

            if index < last && self.yield_policy.should_yield(index) {
                summary.yields += 1;
                tokio::task::yield_now().await;
            }
        }

        Ok(self.finish(summary))
    }

    /// Same as [`decode`](Self::decode) but runs to completion without
    /// suspending. The yield policy is not consulted.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode).
    pub fn decode_blocking(&mut self) -> Result<DecodeSummary, DecodeError> {
        let entries = self.begin()?;
        let mut summary = DecodeSummary::default();

        for (index, &entry) in entries.iter().enumerate() {
            self.decode_entry(index, entry, &mut summary)?;
        }

        Ok(self.finish(summary))
    }

    /// Guard the one-shot state, then read the header.
    fn begin(&mut self) -> Result<Vec<HeaderEntry>, DecodeError> {
        if self.state != DecodeState::NotStarted {
            return Err(DecodeError::Reparse);
        }
        self.state = DecodeState::Decoding;

        debug!(
            count = self.descriptor.count,
            first = self.descriptor.first,
            len = self.parser.cursor().len(),
            "decoding object stream"
        );
        header::read_header(self.parser.cursor_mut(), self.descriptor.count)
    }

    fn decode_entry(
        &mut self,
        index: usize,
        entry: HeaderEntry,
        summary: &mut DecodeSummary,
    ) -> Result<(), DecodeError> {
        let len = self.parser.cursor().len();
        let offset = self.descriptor.first.saturating_add(entry.offset);

        self.parser
            .cursor_mut()
            .seek(offset)
            .map_err(|_| DecodeError::OffsetOutOfRange {
                index,
                object_number: entry.object_number,
                offset,
                len,
            })?;

        let object = self
            .parser
            .parse_object()
            .map_err(|source| DecodeError::ObjectParse {
                index,
                object_number: entry.object_number,
                offset,
                source,
            })?;

        let r = ObjRef::of(entry.object_number);
        trace!(%r, index, offset, kind = %object.kind(), "assigning object");
        self.store.assign(r, object);
        summary.objects += 1;

        if self.parser.number_too_large() {
            summary.number_too_large = true;
            if self.store.is_safe_to_modify() {
                warn!(%r, "object holds a number beyond safe magnitude; marking document unsafe to modify");
                self.store.mark_unsafe_to_modify();
            }
        }

        Ok(())
    }

    fn finish(&mut self, summary: DecodeSummary) -> DecodeSummary {
        self.state = DecodeState::Completed;
        debug!(
            objects = summary.objects,
            yields = summary.yields,
            "object stream decoded"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::num::NonZeroUsize;
    use std::pin::pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Waker};

    use pdfobj_types::{ObjectGraph, PdfObject};

    use super::*;
    use crate::config::ParserConfig;
    use crate::error::ParseError;

    /// Lay out `objects` as an object stream: header, then each body
    /// separated by a newline. Returns `(data, first)`.
    fn build(objects: &[(u32, &str)]) -> (Vec<u8>, usize) {
        let mut body = Vec::new();
        let mut header = String::new();
        for (number, source) in objects {
            header.push_str(&format!("{number} {} ", body.len()));
            body.extend_from_slice(source.as_bytes());
            body.push(b'\n');
        }
        let first = header.len();
        let mut data = header.into_bytes();
        data.extend_from_slice(&body);
        (data, first)
    }

    fn parser<'a>(
        data: &'a [u8],
        first: usize,
        count: usize,
        graph: &'a ObjectGraph,
    ) -> ObjectStreamParser<'a> {
        ObjectStreamParser::new(data, ObjectStreamDescriptor::new(first, count), graph)
    }

    // ── Decoding ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn decodes_catalog_example() {
        // Header "5 0 7 21" padded so that /First is 20.
        let data = b"5 0 7 21            << /Type /Catalog >> 42";
        let graph = ObjectGraph::new();
        let mut decoder = parser(data, 20, 2, &graph);

        let summary = decoder.decode().await.unwrap();

        assert_eq!(summary.objects, 2);
        assert_eq!(decoder.state(), DecodeState::Completed);
        let catalog = graph.lookup(ObjRef::of(5)).unwrap();
        assert_eq!(
            catalog.as_dict().unwrap().get("Type"),
            Some(&PdfObject::name("Catalog"))
        );
        assert_eq!(graph.lookup(ObjRef::of(7)), Some(PdfObject::Number(42.0)));
        assert!(graph.is_safe_to_modify());
    }

    #[tokio::test]
    async fn forward_references_do_not_fail() {
        let (data, first) = build(&[(1, "<< /Pages 2 0 R >>"), (2, "<< /Kids [3 0 R] >>")]);
        let graph = ObjectGraph::new();
        parser(&data, first, 2, &graph).decode().await.unwrap();

        assert_eq!(graph.len(), 2);
        assert!(!graph.contains(ObjRef::of(3)));
    }

    #[tokio::test]
    async fn offsets_need_not_be_increasing() {
        // Entry order 9, 8 while bodies sit in order 8, 9.
        let data = b"9 3 8 0 \n/A /B";
        let graph = ObjectGraph::new();
        parser(data, 9, 2, &graph).decode().await.unwrap();
        assert_eq!(graph.lookup(ObjRef::of(8)), Some(PdfObject::name("A")));
        assert_eq!(graph.lookup(ObjRef::of(9)), Some(PdfObject::name("B")));
    }

    #[tokio::test]
    async fn duplicate_object_number_last_wins() {
        let (data, first) = build(&[(4, "(first)"), (4, "(second)")]);
        let graph = ObjectGraph::new();
        let summary = parser(&data, first, 2, &graph).decode().await.unwrap();

        assert_eq!(summary.objects, 2);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.lookup(ObjRef::of(4)).unwrap().to_string(), "(second)");
    }

    #[tokio::test]
    async fn empty_stream() {
        let graph = ObjectGraph::new();
        let summary = parser(b"", 0, 0, &graph).decode().await.unwrap();
        assert_eq!(summary, DecodeSummary::default());
        assert!(graph.is_empty());
    }

    // ── One-shot state ────────────────────────────────────────────────────

    #[tokio::test]
    async fn second_decode_is_reparse() {
        let (data, first) = build(&[(1, "true")]);
        let graph = ObjectGraph::new();
        let mut decoder = parser(&data, first, 1, &graph);
        decoder.decode().await.unwrap();

        graph.assign(ObjRef::of(1), PdfObject::Null);
        let err = decoder.decode().await.unwrap_err();
        assert!(matches!(err, DecodeError::Reparse));
        // The second call did not overwrite anything.
        assert_eq!(graph.lookup(ObjRef::of(1)), Some(PdfObject::Null));
    }

    #[test]
    fn failed_decode_cannot_restart() {
        let graph = ObjectGraph::new();
        let mut decoder = parser(b"1 x", 0, 1, &graph);
        assert!(matches!(
            decoder.decode_blocking(),
            Err(DecodeError::MalformedHeader { .. })
        ));
        assert_eq!(decoder.state(), DecodeState::Decoding);
        assert!(matches!(decoder.decode_blocking(), Err(DecodeError::Reparse)));
    }

    // ── Failures ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn out_of_range_keeps_earlier_entries() {
        let (built, first) = build(&[(1, "1"), (2, "2")]);
        // Third entry points past the end.
        let header = format!("1 0 2 2 3 {} ", built.len() * 2);
        let mut data = header.clone().into_bytes();
        data.extend_from_slice(&built[first..]);
        let first = header.len();

        let graph = ObjectGraph::new();
        let err = parser(&data, first, 3, &graph).decode().await.unwrap_err();

        assert!(matches!(
            err,
            DecodeError::OffsetOutOfRange {
                index: 2,
                object_number: 3,
                ..
            }
        ));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn offset_overflow_is_out_of_range() {
        let graph = ObjectGraph::new();
        let header = format!("1 {}", usize::MAX);
        let err = parser(header.as_bytes(), 5, 1, &graph)
            .decode_blocking()
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OffsetOutOfRange {
                offset: usize::MAX,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn parse_error_names_the_entry() {
        let (data, first) = build(&[(10, "/Ok"), (11, "<< /Broken ")]);
        let graph = ObjectGraph::new();
        let err = parser(&data, first, 2, &graph).decode().await.unwrap_err();

        match err {
            DecodeError::ObjectParse {
                index,
                object_number,
                offset,
                source,
            } => {
                assert_eq!(index, 1);
                assert_eq!(object_number, 11);
                assert_eq!(offset, first + 4);
                assert!(matches!(source, ParseError::UnexpectedEof { .. }));
            }
            other => panic!("expected ObjectParse, got {other:?}"),
        }
        assert!(graph.contains(ObjRef::of(10)));
    }

    #[tokio::test]
    async fn nested_stream_is_a_parse_error() {
        let (data, first) = build(&[(1, "<< /Length 0 >> stream\n\nendstream")]);
        let graph = ObjectGraph::new();
        let err = parser(&data, first, 1, &graph).decode().await.unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ObjectParse {
                source: ParseError::NestedStream { .. },
                ..
            }
        ));
    }

    // ── Safe-to-modify latch ──────────────────────────────────────────────

    #[tokio::test]
    async fn large_number_clears_latch() {
        let (data, first) = build(&[(1, "[1 2]"), (2, "9007199254740993"), (3, "7")]);
        let graph = ObjectGraph::new();
        let summary = parser(&data, first, 3, &graph).decode().await.unwrap();

        assert!(summary.number_too_large);
        assert!(!graph.is_safe_to_modify());
    }

    #[test]
    fn number_beyond_f64_decodes_and_clears_latch() {
        let digits = "9".repeat(400);
        let data = format!("1 0 {digits}");
        let graph = ObjectGraph::new();

        let summary = parser(data.as_bytes(), 4, 1, &graph)
            .decode_blocking()
            .unwrap();

        assert!(summary.number_too_large);
        assert_eq!(graph.lookup(ObjRef::of(1)), Some(PdfObject::Number(f64::INFINITY)));
        assert!(!graph.is_safe_to_modify());
    }

    #[tokio::test]
    async fn number_beyond_f64_after_lookahead() {
        let member = format!("[1 {}]", "9".repeat(400));
        let (data, first) = build(&[(1, member.as_str()), (2, "/Next")]);
        let graph = ObjectGraph::new();

        let summary = parser(&data, first, 2, &graph).decode().await.unwrap();

        assert_eq!(summary.objects, 2);
        assert!(summary.number_too_large);
        assert!(!graph.is_safe_to_modify());
        assert_eq!(graph.lookup(ObjRef::of(2)), Some(PdfObject::name("Next")));
    }

    #[tokio::test]
    async fn latch_survives_later_safe_streams() {
        let graph = ObjectGraph::new();
        let (data, first) = build(&[(2, "99999999999999999999")]);
        parser(&data, first, 1, &graph).decode().await.unwrap();
        assert!(!graph.is_safe_to_modify());

        let (data, first) = build(&[(3, "1"), (4, "2")]);
        let summary = parser(&data, first, 2, &graph).decode().await.unwrap();
        assert!(!summary.number_too_large);
        assert!(!graph.is_safe_to_modify());
    }

    #[tokio::test]
    async fn custom_limit_from_config() {
        let (data, first) = build(&[(1, "1000")]);
        let graph = ObjectGraph::new();
        let config = DecoderConfig {
            parser: ParserConfig {
                number_limit: 999.0,
                ..ParserConfig::default()
            },
            ..DecoderConfig::default()
        };
        parser(&data, first, 1, &graph)
            .with_config(config)
            .decode()
            .await
            .unwrap();
        assert!(!graph.is_safe_to_modify());
    }

    // ── Yielding ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn always_yield_gives_n_minus_one() {
        let (data, first) = build(&[(1, "1"), (2, "2"), (3, "3"), (4, "4")]);
        let graph = ObjectGraph::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let summary = parser(&data, first, 4, &graph)
            .with_yield_policy(YieldPolicy::when(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }))
            .decode()
            .await
            .unwrap();

        assert_eq!(summary.yields, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn never_yield() {
        let (data, first) = build(&[(1, "1"), (2, "2"), (3, "3")]);
        let graph = ObjectGraph::new();
        let summary = parser(&data, first, 3, &graph)
            .with_yield_policy(YieldPolicy::when(|| false))
            .decode()
            .await
            .unwrap();
        assert_eq!(summary.yields, 0);
    }

    #[tokio::test]
    async fn yield_every_k() {
        let objects: Vec<(u32, &str)> = (0..10).map(|n| (n, "null")).collect();
        let (data, first) = build(&objects);
        let graph = ObjectGraph::new();
        let summary = parser(&data, first, 10, &graph)
            .with_yield_policy(YieldPolicy::Every(NonZeroUsize::new(4).unwrap()))
            .decode()
            .await
            .unwrap();
        // After entries 3 and 7; entry 9 is last and never yields.
        assert_eq!(summary.yields, 2);
        assert_eq!(graph.len(), 10);
    }

    #[test]
    fn blocking_decode_ignores_yield_policy() {
        let (data, first) = build(&[(1, "1"), (2, "2")]);
        let graph = ObjectGraph::new();
        let summary = parser(&data, first, 2, &graph)
            .with_yield_policy(YieldPolicy::when(|| panic!("must not be consulted")))
            .decode_blocking()
            .unwrap();
        assert_eq!(summary.yields, 0);
    }

    #[test]
    fn dropping_future_at_yield_cancels() {
        let (data, first) = build(&[(1, "1"), (2, "2"), (3, "3")]);
        let graph = ObjectGraph::new();
        let mut decoder =
            parser(&data, first, 3, &graph).with_yield_policy(YieldPolicy::when(|| true));

        {
            let mut future = pin!(decoder.decode());
            let mut cx = Context::from_waker(Waker::noop());
            assert!(future.as_mut().poll(&mut cx).is_pending());
        }

        assert_eq!(graph.len(), 1);
        assert_eq!(decoder.state(), DecodeState::Decoding);
        assert!(matches!(decoder.decode_blocking(), Err(DecodeError::Reparse)));
    }

    #[test]
    fn for_dict_reads_descriptor() {
        let (data, first) = build(&[(3, "/X")]);
        let dict = ObjectParser::new(format!("<< /N 1 /First {first} >>").as_bytes())
            .parse_object()
            .unwrap()
            .as_dict()
            .unwrap()
            .clone();
        let graph = ObjectGraph::new();
        let mut decoder = ObjectStreamParser::for_dict(&data, &dict, &graph).unwrap();
        assert_eq!(decoder.descriptor().first, first);
        decoder.decode_blocking().unwrap();
        assert!(graph.contains(ObjRef::of(3)));
    }
}
