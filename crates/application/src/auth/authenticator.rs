//! Login and registration exchanges.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use studex_domain::{Credential, RequestSpec, ServiceSettings, StatusCode};
use tracing::{info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{CredentialStore, HttpClient};

/// Body of `POST /api/token/`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /api/register/`.
#[derive(Clone, Serialize)]
pub struct RegistrationRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Chosen password.
    pub password: String,
}

impl RegistrationRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenPair {
    #[serde(default)]
    access: String,
    #[serde(default)]
    refresh: String,
}

/// Performs the credential exchanges and is the only writer of the store.
#[derive(Clone)]
pub struct Authenticator {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn CredentialStore>,
    settings: Arc<ServiceSettings>,
}

impl Authenticator {
    /// Creates an authenticator.
    #[must_use]
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn CredentialStore>,
        settings: Arc<ServiceSettings>,
    ) -> Self {
        Self {
            http,
            store,
            settings,
        }
    }

    /// Exchanges a username and password for tokens and persists them.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` when the service answers `401`
    /// - `AuthFailed` for any other status, a transport failure, a
    ///   success body without an access token, or a token URL that cannot
    ///   be built from the settings
    /// - `StorageFault` when the tokens cannot be persisted
    pub async fn login(&self, request: &LoginRequest) -> ApplicationResult<Credential> {
        let spec = self
            .settings
            .token_url()
            .and_then(|url| RequestSpec::post_json(url, request))
            .map_err(|e| {
                warn!(error = %e, "cannot build login request");
                ApplicationError::AuthFailed(format!("cannot build request: {e}"))
            })?;

        let response = self.http.execute(spec).await.map_err(|e| {
            warn!(username = %request.username, error = %e, "login request failed");
            ApplicationError::AuthFailed(e.to_string())
        })?;

        if response.status == StatusCode::UNAUTHORIZED {
            info!(username = %request.username, "login rejected");
            return Err(ApplicationError::InvalidCredentials);
        }
        if !response.is_success() {
            warn!(username = %request.username, status = %response.status, "login failed");
            return Err(ApplicationError::AuthFailed(format!(
                "token endpoint responded {}",
                response.status
            )));
        }

        let pair: TokenPair = response
            .json_body()
            .map_err(|e| ApplicationError::AuthFailed(format!("malformed token response: {e}")))?;
        let credential = Credential::new(pair.access, pair.refresh)
            .map_err(|_| ApplicationError::AuthFailed("token response had no access token".to_string()))?;

        self.store.save_credential(&credential).await.map_err(|e| {
            warn!(error = %e, "could not persist issued tokens");
            ApplicationError::from(e)
        })?;

        info!(
            username = %request.username,
            token = %credential.access_token.preview(),
            "logged in"
        );
        Ok(credential)
    }

    /// Creates an account. Only `201 Created` counts as success.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailed` for any other outcome.
    pub async fn register(&self, request: &RegistrationRequest) -> ApplicationResult<()> {
        let spec = self
            .settings
            .register_url()
            .and_then(|url| RequestSpec::post_json(url, request))
            .map_err(|e| {
                warn!(error = %e, "cannot build registration request");
                ApplicationError::RegistrationFailed(format!("cannot build request: {e}"))
            })?;

        let response = self.http.execute(spec).await.map_err(|e| {
            warn!(email = %request.email, error = %e, "registration request failed");
            ApplicationError::RegistrationFailed(e.to_string())
        })?;

        if response.status != StatusCode::CREATED {
            warn!(email = %request.email, status = %response.status, "registration refused");
            return Err(ApplicationError::RegistrationFailed(format!(
                "register endpoint responded {}",
                response.status
            )));
        }

        info!(email = %request.email, "registered");
        Ok(())
    }

    /// Clears both stored tokens.
    ///
    /// # Errors
    ///
    /// Returns `StorageFault` if the store cannot be written.
    pub async fn forget_credential(&self) -> ApplicationResult<()> {
        self.store.forget_credential().await?;
        info!("stored credential cleared");
        Ok(())
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("base_url", &self.settings.base_url)
            .finish_non_exhaustive()
    }
}
