//! Studex Application - session-gated directory access
//!
//! This crate wires the domain model to the outside world through ports:
//! acquiring and persisting credentials, gating reads until a session is
//! resolved, de-duplicating and caching directory queries, and tracking
//! per-screen selection.

pub mod auth;
pub mod directory;
pub mod error;
pub mod ports;
pub mod screen;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{Authenticator, MemoryCredentialStore};
pub use directory::{DirectoryQueryEngine, QueryOutput};
pub use error::{ApplicationError, ApplicationResult};
pub use screen::{ClientContext, DirectoryScreen};
pub use session::SessionResolver;
