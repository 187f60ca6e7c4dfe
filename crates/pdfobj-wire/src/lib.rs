#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod lexer;

pub use cursor::{ByteCursor, Location};
pub use error::WireError;
pub use lexer::RawNumber;
