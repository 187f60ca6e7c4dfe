/// Implementation of `pdfobj inspect`.
///
/// Decodes the object stream and prints every member in object number
/// order. With `--object N` only that member is printed; with `--json` a
/// machine-readable report goes to stdout instead.
///
/// # Output format
///
/// ```text
/// Object stream: 2 objects, first=20, 43 bytes
/// 5 0 R = << /Type /Catalog >>
/// 7 0 R = 42
/// ---
/// Safe to modify: yes
/// ```
use anyhow::{Context, Result};
use pdfobj_types::{ObjRef, ObjectStore, PdfObject};
use serde::Serialize;

use crate::InspectArgs;
use crate::stream;

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report {
    first: usize,
    count: usize,
    bytes: usize,
    yields: usize,
    safe_to_modify: bool,
    objects: Vec<ObjectReport>,
}

#[derive(Serialize)]
struct ObjectReport {
    object_number: u32,
    generation: u16,
    kind: String,
    value: String,
}

impl ObjectReport {
    fn new(r: ObjRef, object: &PdfObject) -> Self {
        Self {
            object_number: r.object_number,
            generation: r.generation,
            kind: object.kind().to_string(),
            value: object.to_string(),
        }
    }
}

/// Run the `pdfobj inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the layout flags are
/// unusable, any member fails to decode, or `--object` names an object
/// the stream does not contain.
pub fn run(args: &InspectArgs) -> Result<()> {
    let decoded = stream::decode(&args.stream)?;
    let summary = decoded
        .result
        .with_context(|| format!("failed to decode {}", args.stream.file.display()))?;

    let objects: Vec<(ObjRef, PdfObject)> = decoded
        .graph
        .enumerate()
        .into_iter()
        .filter(|(r, _)| args.object.is_none_or(|n| r.object_number == n))
        .collect();

    if let Some(n) = args.object
        && objects.is_empty()
    {
        anyhow::bail!("object {n} is not in this stream");
    }

    let safe_to_modify = decoded.graph.is_safe_to_modify();

    if args.json {
        let report = Report {
            first: decoded.descriptor.first,
            count: decoded.descriptor.count,
            bytes: decoded.data.len(),
            yields: summary.yields,
            safe_to_modify,
            objects: objects
                .iter()
                .map(|(r, object)| ObjectReport::new(*r, object))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Object stream: {} object{}, first={}, {} bytes",
        summary.objects,
        if summary.objects == 1 { "" } else { "s" },
        decoded.descriptor.first,
        decoded.data.len()
    );
    for (r, object) in &objects {
        println!("{r} = {object}");
    }
    println!("---");
    println!(
        "Safe to modify: {}",
        if safe_to_modify {
            "yes"
        } else {
            "no (numbers beyond 2^53 - 1)"
        }
    );

    Ok(())
}
