//! Deterministic JSON serialization for Strand project files.
//!
//! Keeps diffs of saved projects small by:
//! - Writing fields in declaration order, vectors in store order
//! - Using 2-space indentation
//! - Adding trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
