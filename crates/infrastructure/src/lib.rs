//! Studex Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: a reqwest-backed HTTP client and a
//! file-backed credential store.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use persistence::FileCredentialStore;
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
