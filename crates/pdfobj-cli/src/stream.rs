/// Loading and decoding shared by every sub-command.
use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use pdfobj_decoder::{
    DecodeError, DecodeSummary, DecoderConfig, ObjectParser, ObjectStreamDescriptor,
    ObjectStreamParser, ParserConfig,
};
use pdfobj_types::ObjectGraph;

use crate::StreamArgs;

/// The raw data plus what decoding it produced.
///
/// The decode result is kept separate from the `anyhow` errors of
/// loading so `validate` can report it in detail.
pub struct Decoded {
    pub data: Vec<u8>,
    pub descriptor: ObjectStreamDescriptor,
    pub graph: ObjectGraph,
    pub result: Result<DecodeSummary, DecodeError>,
}

/// Read the file named by `args`, work out its layout, and decode it into
/// a fresh [`ObjectGraph`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if neither
/// `--first`/`--count` nor a usable `--dict` was given. Decode failures
/// are reported through [`Decoded::result`] instead.
pub fn decode(args: &StreamArgs) -> Result<Decoded> {
    let data =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let graph = ObjectGraph::new();
    let descriptor = descriptor(args, &graph)?;

    let config = DecoderConfig {
        parser: ParserConfig {
            cap_numbers: args.cap_numbers,
            ..ParserConfig::default()
        },
        ..DecoderConfig::default()
    };

    let result = ObjectStreamParser::new(&data, descriptor, &graph)
        .with_config(config)
        .decode_blocking();

    Ok(Decoded {
        data,
        descriptor,
        graph,
        result,
    })
}

fn descriptor(args: &StreamArgs, graph: &ObjectGraph) -> Result<ObjectStreamDescriptor> {
    if let (Some(first), Some(count)) = (args.first, args.count) {
        return Ok(ObjectStreamDescriptor::new(first, count));
    }

    let Some(source) = args.dict.as_deref() else {
        bail!("either --first and --count, or --dict, is required");
    };

    let object = ObjectParser::new(source.as_bytes())
        .parse_object()
        .context("cannot parse --dict")?;
    let dict = object
        .as_dict()
        .map_err(|e| anyhow!("--dict must be a dictionary: {e}"))?;

    ObjectStreamDescriptor::from_dict(dict, graph).context("--dict does not describe an object stream")
}
