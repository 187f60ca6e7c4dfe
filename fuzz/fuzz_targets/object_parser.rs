#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfobj_decoder::ObjectParser;

// Fuzz target: one value from arbitrary bytes.
//
// Catches bugs in:
// - Reference lookahead and backtracking (`1 0 R` vs `1 0`)
// - Deeply nested arrays and dictionaries
// - Unterminated strings and names
// - Display of whatever was parsed
fuzz_target!(|data: &[u8]| {
    let mut parser = ObjectParser::new(data);
    if let Ok(object) = parser.parse_object() {
        assert!(parser.cursor().offset() <= data.len());
        let _ = object.to_string();
    }
});
