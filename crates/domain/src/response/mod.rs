//! HTTP response types.

mod spec;

pub use spec::{ResponseSpec, StatusCode};
