#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfobj_wire::lexer::{parse_raw_int, parse_raw_number, skip_whitespace_and_comments};
use pdfobj_wire::ByteCursor;

// Fuzz target: integer and number tokens.
//
// Catches bugs in:
// - Integer overflow on long digit runs
// - Sign and period handling in reals
// - Comments that run to end of input
// - Cursor positions after a failed token
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data);
    while !cursor.is_done() {
        let before = cursor.offset();
        skip_whitespace_and_comments(&mut cursor);
        let start = cursor.offset();

        if parse_raw_int(&mut cursor).is_err() {
            cursor.rewind(start);
            match parse_raw_number(&mut cursor) {
                Ok(number) => assert!(!number.value.is_nan()),
                Err(_) => {
                    cursor.rewind(start);
                    cursor.next();
                }
            }
        }
        assert!(cursor.offset() > before || cursor.is_done());
    }
});
