/// Implementation of `pdfobj validate`.
///
/// Decodes the object stream and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). The command exits
/// with code 0 on a valid stream and code 1 on any error.
///
/// # Success output
///
/// ```text
/// ✓ Header: 2 entries
/// ✓ Objects: 2 objects parsed successfully
/// ✓ Numbers: all within safe magnitude
/// ```
///
/// A stream holding numbers beyond 2^53 − 1 still validates, with a `!`
/// line in place of the last checkmark.
///
/// # Failure output
///
/// ```text
/// ✗ Error: failed to parse object 7 (entry 1) at offset 30: unexpected byte 0x29 at offset 30
///          at line 2, column 11
/// ```
use anyhow::{Result, anyhow};
use pdfobj_decoder::DecodeError;
use pdfobj_wire::ByteCursor;

use crate::ValidateArgs;
use crate::stream;

/// Run the `pdfobj validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the layout flags are
/// unusable, or the stream fails to decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let decoded = stream::decode(&args.stream)?;

    match decoded.result {
        Ok(summary) => {
            println!(
                "✓ Header: {} entr{}",
                decoded.descriptor.count,
                if decoded.descriptor.count == 1 { "y" } else { "ies" }
            );
            println!(
                "✓ Objects: {} object{} parsed successfully",
                summary.objects,
                if summary.objects == 1 { "" } else { "s" }
            );
            if summary.number_too_large {
                println!("! Numbers: some exceed 2^53 - 1; document is not safe to modify");
            } else {
                println!("✓ Numbers: all within safe magnitude");
            }
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {e}");
            if let Some(offset) = error_offset(&e) {
                let at = ByteCursor::new(&decoded.data).location(offset);
                println!("         at line {}, column {}", at.line, at.column);
            }
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error location ────────────────────────────────────────────────────────────

/// Byte offset worth pointing the user at, when the error has one inside
/// the data.
fn error_offset(e: &DecodeError) -> Option<usize> {
    match e {
        DecodeError::MalformedHeader { source, .. } => Some(source.offset()),
        DecodeError::ObjectParse { source, .. } => Some(source.offset()),
        DecodeError::OffsetOutOfRange { .. }
        | DecodeError::Reparse
        | DecodeError::InvalidDescriptor(_) => None,
    }
}
