//! In-memory credential storage.
//!
//! This module provides a thread-safe store implementing the
//! `CredentialStore` port without touching the disk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{CredentialStore, StorageError};

/// Thread-safe in-memory credential store.
///
/// Clones share the same underlying map, so one store can be handed to the
/// authenticator and to every screen.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Get count of stored values.
    pub async fn count(&self) -> usize {
        let values = self.values.read().await;
        values.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        for (name, value) in entries {
            values.insert((*name).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().await;
        Ok(values.get(name).cloned())
    }

    async fn clear(&self, name: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        values.remove(name);
        Ok(())
    }
}
