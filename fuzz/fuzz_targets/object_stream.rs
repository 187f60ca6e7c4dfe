#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pdfobj_decoder::{DecodeError, ObjectStreamDescriptor, ObjectStreamParser};
use pdfobj_types::ObjectGraph;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    first: u16,
    count: u8,
    data: &'a [u8],
}

// Fuzz target: full object stream decode.
//
// Catches bugs in:
// - Header tables shorter than /N
// - Offsets past the end of the data, including overflow of first + offset
// - Partial decodes leaving the graph in a consistent state
// - The one-shot guard after both success and failure
fuzz_target!(|input: Input<'_>| {
    let graph = ObjectGraph::new();
    let descriptor = ObjectStreamDescriptor::new(input.first.into(), input.count.into());
    let mut parser = ObjectStreamParser::new(input.data, descriptor, &graph);

    match parser.decode_blocking() {
        Ok(summary) => assert_eq!(summary.objects, usize::from(input.count)),
        Err(e) => assert!(graph.len() <= e.entry_index().unwrap_or(0)),
    }
    assert!(graph.enumerate().iter().all(|(r, _)| r.generation == 0));
    assert!(matches!(parser.decode_blocking(), Err(DecodeError::Reparse)));
});
