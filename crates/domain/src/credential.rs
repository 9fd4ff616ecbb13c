//! Access credentials issued by the directory service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Storage name of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage name of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// A non-empty bearer token.
///
/// Holding an `AccessToken` is the proof that a session resolved with a
/// usable credential; read operations can only be built from one.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyToken` if the value is empty or whitespace.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self(value))
    }

    /// Returns the raw token value, for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns a short preview safe for logs (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() > 12 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        }
    }
}

impl TryFrom<String> for AccessToken {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.preview()).finish()
    }
}

/// Token pair issued by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Short-lived bearer credential for directory reads.
    pub access_token: AccessToken,
    /// Longer-lived credential for renewing the access token.
    pub refresh_token: String,
}

impl Credential {
    /// Creates a credential from the raw token values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyToken` if the access token is empty.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            access_token: AccessToken::new(access)?,
            refresh_token: refresh.into(),
        })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &self.access_token)
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(AccessToken::new(""), Err(DomainError::EmptyToken));
        assert_eq!(AccessToken::new("   "), Err(DomainError::EmptyToken));
    }

    #[test]
    fn test_token_preview() {
        let token = AccessToken::new("abcdefghijklmnop").unwrap();
        assert_eq!(token.preview(), "abcdefgh...");

        let short = AccessToken::new("short").unwrap();
        assert_eq!(short.preview(), "***");
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let credential = Credential::new("eyJhbGciOiJIUzI1NiJ9.payload", "refresh-secret").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("payload"));
        assert!(!debug.contains("refresh-secret"));
    }

    #[test]
    fn test_token_serde_rejects_empty() {
        let parsed: Result<AccessToken, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: AccessToken = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(parsed.expose(), "tok");
    }
}
