//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod credential_store;
mod http_client;

pub use credential_store::{CredentialStore, StorageError};
pub use http_client::{HttpClient, HttpClientError, HttpFuture};
