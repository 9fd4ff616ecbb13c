//! Durable local state.

mod credential_file;

pub use credential_file::FileCredentialStore;
