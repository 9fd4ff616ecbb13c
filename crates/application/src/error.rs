//! Application error types

use studex_domain::{DomainError, FailureKind, StatusCode};
use thiserror::Error;

use crate::ports::{HttpClientError, StorageError};

/// Application-level errors.
///
/// `Clone` so that the single outcome of a shared in-flight request can be
/// handed to every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// Caller input was rejected without a network call.
    #[error("validation error: {0}")]
    Validation(#[from] DomainError),

    /// Durable credential storage is unavailable.
    #[error("storage fault: {0}")]
    StorageFault(String),

    /// The service explicitly rejected the username or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Login failed for any other reason.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Registration did not return the created status.
    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// A gated read failed after the session was ready.
    #[error("fetch failed: {message}")]
    FetchFailed {
        /// HTTP status, when the service answered.
        status: Option<StatusCode>,
        /// What went wrong.
        message: String,
    },

    /// A read was attempted before the session resolved.
    #[error("session has not been resolved yet")]
    SessionUnresolved,

    /// A read was attempted without an authenticated session.
    #[error("no authenticated session")]
    SessionAbsent,
}

impl ApplicationError {
    /// Creates a fetch failure for a non-success status.
    #[must_use]
    pub fn fetch_status(status: StatusCode) -> Self {
        Self::FetchFailed {
            status: Some(status),
            message: format!("service responded {status}"),
        }
    }

    /// Creates a fetch failure with no status (transport or decoding).
    #[must_use]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            status: None,
            message: message.into(),
        }
    }

    /// Maps the error to its presentation category.
    ///
    /// Returns `None` for the session states, which are rendered as their own
    /// view states rather than as failures.
    #[must_use]
    pub const fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Validation(_) => Some(FailureKind::Validation),
            Self::StorageFault(_) => Some(FailureKind::Storage),
            Self::InvalidCredentials => Some(FailureKind::InvalidCredentials),
            Self::AuthFailed(_) => Some(FailureKind::Auth),
            Self::RegistrationFailed(_) => Some(FailureKind::Registration),
            Self::FetchFailed {
                status: Some(StatusCode::NOT_FOUND),
                ..
            } => Some(FailureKind::NotFound),
            Self::FetchFailed { .. } => Some(FailureKind::Fetch),
            Self::SessionUnresolved | Self::SessionAbsent => None,
        }
    }

    /// Message for the user, independent of technical details.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(DomainError::InvalidIdentifier(input)) if input.trim().is_empty() => {
                "Please enter an ID to search."
            }
            Self::Validation(_) => "Please enter a valid student ID.",
            Self::StorageFault(_) => "Device storage is unavailable.",
            Self::InvalidCredentials => "Invalid username or password.",
            Self::AuthFailed(_) | Self::RegistrationFailed(_) => {
                "Something went wrong. Please try again later."
            }
            Self::FetchFailed {
                status: Some(StatusCode::NOT_FOUND),
                ..
            } => "Student not found.",
            Self::FetchFailed { .. } => "Could not load students. Please try again.",
            Self::SessionUnresolved => "Loading your session...",
            Self::SessionAbsent => "You are not logged in. Please log in again.",
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        Self::StorageFault(error.to_string())
    }
}

impl From<HttpClientError> for ApplicationError {
    fn from(error: HttpClientError) -> Self {
        Self::fetch(error.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
