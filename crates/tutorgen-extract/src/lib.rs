//! Code element extraction for tutorgen
//!
//! Turns a Rust source tree into a flat, stable-ordered list of
//! [`CodeElement`]s: top-level functions, structs and enums, and methods in
//! impl blocks. This list is the input to every later pipeline stage.

mod scanner;
mod types;

pub use scanner::{scan, ScanError};
pub use types::{CodeElement, ElementKind};
