#![warn(clippy::pedantic)]

pub mod error;
pub mod reference;
pub mod name;
pub mod string;
pub mod dict;
pub mod object;
pub mod graph;

pub use dict::PdfDict;
pub use error::TypeError;
pub use graph::{GraphSnapshot, ObjectGraph, ObjectStore};
pub use name::PdfName;
pub use object::{ObjectKind, PdfObject};
pub use reference::ObjRef;
pub use string::PdfString;
