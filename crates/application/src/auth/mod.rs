//! Authentication module for the Studex client.
//!
//! This module provides:
//! - The authenticator performing login and registration exchanges
//! - An in-memory credential store

mod authenticator;
mod token_store;

pub use authenticator::{Authenticator, LoginRequest, RegistrationRequest};
pub use token_store::MemoryCredentialStore;
