//! Touchstone file input
//!
//! Reads Touchstone v1 (.sNp) files into [`Touchstone`] containers.

pub mod parser;

pub use parser::{OptionLine, Touchstone, TouchstoneError};
