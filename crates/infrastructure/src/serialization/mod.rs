//! Stable JSON encoding for files written by the client.
//!
//! Files are pretty-printed with 2-space indentation, sorted keys (callers
//! use `BTreeMap`) and a trailing newline, so the same content is always
//! written byte-for-byte the same.

mod json;

pub use json::*;
