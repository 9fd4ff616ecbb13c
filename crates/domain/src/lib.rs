//! Studex Domain - Core business types
//!
//! This crate defines the domain model for the Studex directory client.
//! All types here are pure Rust with no I/O dependencies.

pub mod credential;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod selection;
pub mod session;
pub mod settings;
pub mod state;
pub mod student;

pub use credential::{AccessToken, Credential, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use error::{DomainError, DomainResult};
pub use query::{LookupId, QueryKey};
pub use request::{HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use selection::DetailSelection;
pub use session::SessionStatus;
pub use settings::{
    DEFAULT_BASE_URL, DEFAULT_COHORT_YEAR, DEFAULT_IMAGE_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS,
    ServiceSettings,
};
pub use state::{FailureKind, ViewState};
pub use student::{StudentId, StudentRecord};
