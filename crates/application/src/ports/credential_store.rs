//! Credential store port
//!
//! Defines the interface for durable key/value storage of issued tokens.

use async_trait::async_trait;
use studex_domain::{AccessToken, Credential, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Errors that can occur during credential storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying storage is unavailable or full.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data could not be read back.
    #[error("corrupt storage: {0}")]
    Corrupt(String),
}

/// Durable string storage surviving process restarts.
///
/// Each operation is atomic: no partial write is ever observable by a
/// later `get`. That includes `put_many`, which stores all of its entries
/// or none of them.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists `value` under `name`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable or full.
    async fn put(&self, name: &str, value: &str) -> Result<(), StorageError>;

    /// Persists every `(name, value)` pair in one step.
    ///
    /// Either all entries are stored or, on error, none of them is.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable or full.
    async fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Returns the value stored under `name`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage itself cannot be read; a missing
    /// name is not an error.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Removes the value stored under `name`. Removing a missing name succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable.
    async fn clear(&self, name: &str) -> Result<(), StorageError>;

    /// Persists both tokens of a credential as one write. A failure leaves
    /// the previously stored pair untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable or full.
    async fn save_credential(&self, credential: &Credential) -> Result<(), StorageError> {
        self.put_many(&[
            (ACCESS_TOKEN_KEY, credential.access_token.expose()),
            (REFRESH_TOKEN_KEY, credential.refresh_token.as_str()),
        ])
        .await
    }

    /// Loads the access token. An empty stored value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    async fn load_access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        let value = self.get(ACCESS_TOKEN_KEY).await?;
        Ok(value.and_then(|v| AccessToken::new(v).ok()))
    }

    /// Removes both tokens.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    async fn forget_credential(&self) -> Result<(), StorageError> {
        self.clear(ACCESS_TOKEN_KEY).await?;
        self.clear(REFRESH_TOKEN_KEY).await
    }
}
