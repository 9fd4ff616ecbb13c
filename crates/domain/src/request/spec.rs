//! Request specification type

use std::fmt;

use serde::Serialize;

use super::HttpMethod;
use crate::credential::AccessToken;
use crate::error::{DomainError, DomainResult};

/// Content type used for every request body sent to the directory service.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Complete specification for one outbound HTTP request.
///
/// The `Debug` output redacts the `Authorization` header so request specs can
/// be logged without leaking bearer tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// HTTP headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Request body, already encoded
    pub body: Option<String>,
}

impl RequestSpec {
    /// Creates a GET request for the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request with a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the payload cannot be serialized.
    pub fn post_json<T: Serialize>(url: impl Into<String>, payload: &T) -> DomainResult<Self> {
        let body =
            serde_json::to_string(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    /// Adds a header, replacing any existing header with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Attaches the token as a bearer credential.
    #[must_use]
    pub fn with_bearer(self, token: &AccessToken) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token.expose()))
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(n, v)| {
                if n.eq_ignore_ascii_case("authorization") {
                    (n.as_str(), "<redacted>")
                } else {
                    (n.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(String::len))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_request() {
        let req = RequestSpec::get("https://api.example.com/api/2026/");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.body, None);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_post_json_sets_content_type() {
        let req =
            RequestSpec::post_json("https://api.example.com/api/token/", &json!({"a": 1})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_bearer_header_replaces_existing() {
        let token = AccessToken::new("abc").unwrap();
        let req = RequestSpec::get("https://x.test/")
            .with_header("authorization", "Basic zzz")
            .with_bearer(&token);
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let req = RequestSpec::get("https://x.test/").with_bearer(&token);
        let debug = format!("{req:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
