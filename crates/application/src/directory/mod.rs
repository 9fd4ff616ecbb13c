//! Directory queries.
//!
//! Gated, de-duplicated and cached reads of the student directory.

mod engine;

pub use engine::{DirectoryQueryEngine, QueryOutput};
