//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use studex_domain::{RequestSpec, ResponseSpec};

/// Errors raised before a complete response was received.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// No connection could be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other transport error.
    #[error("{0}")]
    Other(String),
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// It is object safe so one client can be shared as `Arc<dyn HttpClient>`.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful execution;
    /// interpreting it is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems.
    fn execute(&self, request: RequestSpec) -> HttpFuture<'_>;
}
