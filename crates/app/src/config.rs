//! Builds the shared client context from command-line settings.

use std::path::PathBuf;
use std::sync::Arc;

use studex_application::ClientContext;
use studex_application::ports::{CredentialStore, HttpClient, HttpClientError};
use studex_domain::{DomainError, ServiceSettings};
use studex_infrastructure::{FileCredentialStore, ReqwestHttpClient};
use thiserror::Error;

use crate::cli::ServiceArgs;

/// Invalid or unusable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting failed validation.
    #[error("invalid setting: {0}")]
    Settings(#[from] DomainError),

    /// The timeout must be positive.
    #[error("timeout must be at least one second")]
    ZeroTimeout,

    /// No credential file location could be determined.
    #[error("no data directory on this platform; pass --credentials <PATH>")]
    NoCredentialPath,

    /// The HTTP client could not be built.
    #[error("could not initialise HTTP client: {0}")]
    Http(#[from] HttpClientError),
}

pub fn settings_from(args: &ServiceArgs) -> Result<ServiceSettings, ConfigError> {
    if args.timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    let settings = ServiceSettings {
        base_url: args.base_url.clone(),
        cohort_year: args.cohort_year,
        image_url_template: args.image_url_template.clone(),
        request_timeout_secs: args.timeout_secs,
    };
    settings.validate()?;
    Ok(settings)
}

fn credential_path(args: &ServiceArgs) -> Result<PathBuf, ConfigError> {
    args.credentials
        .clone()
        .or_else(FileCredentialStore::default_path)
        .ok_or(ConfigError::NoCredentialPath)
}

pub fn build_context(args: &ServiceArgs) -> Result<ClientContext, ConfigError> {
    let settings = settings_from(args)?;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::from_settings(&settings)?);
    let path = credential_path(args)?;
    tracing::debug!(path = %path.display(), "using credential file");
    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(path));
    Ok(ClientContext::new(store, http, Arc::new(settings)))
}
