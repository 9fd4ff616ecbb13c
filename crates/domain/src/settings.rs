//! Directory service settings.
//!
//! Defines where the directory service lives and how its endpoints and
//! student image URLs are built.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::query::LookupId;
use crate::student::StudentId;

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://shivam.echotratech.com";

/// Default cohort year segment of the directory endpoints.
pub const DEFAULT_COHORT_YEAR: u16 = 2026;

/// Default student image URL template.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str = "https://erp.psit.ac.in/assets/img/Simages/{id}.jpg";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Base URL of the service, without the `/api` prefix.
    pub base_url: String,
    /// Cohort year used in directory paths (`/api/<year>/`).
    pub cohort_year: u16,
    /// Image URL template; `{id}` is replaced by the student identifier.
    pub image_url_template: String,
    /// Transport timeout for each request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cohort_year: DEFAULT_COHORT_YEAR,
            image_url_template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceSettings {
    /// Checks that the base URL and image template are usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` or `DomainError::InvalidImageTemplate`.
    pub fn validate(&self) -> DomainResult<()> {
        let base = self.base()?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(self.base_url.clone()));
        }
        if !self.image_url_template.contains("{id}") {
            return Err(DomainError::InvalidImageTemplate(
                self.image_url_template.clone(),
            ));
        }
        Ok(())
    }

    /// Transport timeout for each request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `POST` endpoint issuing access and refresh tokens.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is malformed.
    pub fn token_url(&self) -> DomainResult<String> {
        self.endpoint("api/token/")
    }

    /// `POST` endpoint creating an account.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is malformed.
    pub fn register_url(&self) -> DomainResult<String> {
        self.endpoint("api/register/")
    }

    /// `GET` endpoint listing the full roster.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is malformed.
    pub fn roster_url(&self) -> DomainResult<String> {
        self.endpoint(&format!("api/{}/", self.cohort_year))
    }

    /// `GET` endpoint listing today's birthdays.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is malformed.
    pub fn birthday_url(&self) -> DomainResult<String> {
        self.endpoint(&format!("api/{}/birthday/", self.cohort_year))
    }

    /// `GET` endpoint for a single record.
    ///
    /// The identifier is percent-encoded as one path segment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is malformed.
    pub fn student_url(&self, id: &LookupId) -> DomainResult<String> {
        let mut url = self.join(&format!("api/{}/", self.cohort_year))?;
        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url.into())
    }

    /// Image URL for a student. No authentication is needed to fetch it.
    #[must_use]
    pub fn image_url(&self, id: StudentId) -> String {
        self.image_url_template.replace("{id}", &id.to_string())
    }

    fn base(&self) -> DomainResult<Url> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base)
    }

    fn join(&self, path: &str) -> DomainResult<Url> {
        self.base()?
            .join(path)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")))
    }

    fn endpoint(&self, path: &str) -> DomainResult<String> {
        self.join(path).map(Into::into)
    }
}
