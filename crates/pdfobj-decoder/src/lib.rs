#![warn(clippy::pedantic)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod header;
pub mod object_parser;
pub mod object_stream;
pub mod yield_policy;

pub use config::{DecoderConfig, MAX_SAFE_INTEGER, ParserConfig};
pub use descriptor::ObjectStreamDescriptor;
pub use error::{DecodeError, ParseError};
pub use header::HeaderEntry;
pub use object_parser::ObjectParser;
pub use object_stream::{DecodeState, DecodeSummary, ObjectStreamParser};
pub use yield_policy::YieldPolicy;
