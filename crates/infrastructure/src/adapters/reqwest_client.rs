//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Every status the service answers with is returned as a response; only
//! transport problems become errors.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, Url};
use studex_application::ports::{HttpClient, HttpClientError, HttpFuture};
use studex_domain::{HttpMethod, RequestSpec, ResponseSpec, ServiceSettings};
use tracing::debug;

const USER_AGENT: &str = concat!("studex/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` configured with a whole-request timeout; the
/// timeout is the only bound on how long a directory read can take.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Creates a client using the timeout from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, HttpClientError> {
        Self::new(settings.request_timeout())
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Maps reqwest errors to port errors.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }
        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(error.to_string());
        }
        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: RequestSpec) -> HttpFuture<'_> {
        Box::pin(async move {
            let url = Url::parse(&request.url)
                .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
            let timeout_ms = self.timeout_ms();
            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Body(e.to_string()))?
                .to_vec();
            let duration = start.elapsed();

            debug!(
                method = %request.method,
                url = %request.url,
                status,
                elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "http exchange complete"
            );
            Ok(ResponseSpec::new(status, body))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Post), Method::POST);
    }

    #[test]
    fn test_client_uses_settings_timeout() {
        let settings = ServiceSettings {
            request_timeout_secs: 7,
            ..ServiceSettings::default()
        };
        let client = ReqwestHttpClient::from_settings(&settings).unwrap();
        assert_eq!(client.timeout_ms(), 7_000);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = ReqwestHttpClient::new(Duration::from_secs(1)).unwrap();
        let err = client
            .execute(RequestSpec::get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpClientError::InvalidUrl(_)));
    }
}
