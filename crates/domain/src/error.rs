//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A student identifier is empty, blank or malformed.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A token value was empty.
    #[error("token must not be empty")]
    EmptyToken,

    /// The image URL template has no `{id}` placeholder.
    #[error("image URL template must contain {{id}}: {0}")]
    InvalidImageTemplate(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
