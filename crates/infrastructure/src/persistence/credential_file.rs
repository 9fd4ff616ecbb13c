//! File-backed credential store.
//!
//! Tokens are stored in one JSON object:
//!
//! ```json
//! {
//!   "access_token": "...",
//!   "refresh_token": "..."
//! }
//! ```
//!
//! Every write goes to a sibling temporary file that is then renamed over
//! the real one, so a reader never sees a half-written file. A batch of
//! entries (both tokens of a credential) lands in a single such write.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use studex_application::ports::{CredentialStore, StorageError};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

type Entries = BTreeMap<String, String>;

/// Credential store persisted to a JSON file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Creates a store at `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<data dir>/studex/credentials.json`, if the platform has a data dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("studex").join("credentials.json"))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => from_json_bytes(&bytes).map_err(|e| {
                StorageError::Corrupt(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content =
            to_json_stable_bytes(entries).map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, content).await?;
        restrict_permissions(&temp).await?;
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io(e));
        }
        debug!(path = %self.path.display(), entries = entries.len(), "credential file written");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn put(&self, name: &str, value: &str) -> Result<(), StorageError> {
        self.put_many(&[(name, value)]).await
    }

    async fn put_many(&self, batch: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        for (name, value) in batch {
            entries.insert((*name).to_string(), (*value).to_string());
        }
        self.write_entries(&entries).await
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(name).cloned())
    }

    async fn clear(&self, name: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(name).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use studex_domain::{ACCESS_TOKEN_KEY, Credential, REFRESH_TOKEN_KEY};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        store_in(&dir)
            .save_credential(&Credential::new("acc", "ref").unwrap())
            .await
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("acc"));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("ref"));

        let raw = std::fs::read_to_string(reopened.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json, serde_json::json!({"access_token": "acc", "refresh_token": "ref"}));
    }

    #[tokio::test]
    async fn test_put_replaces_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.put(ACCESS_TOKEN_KEY, "one").await.unwrap();
        store.put(ACCESS_TOKEN_KEY, "two").await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("two"));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_pair() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save_credential(&Credential::new("old-access", "old-refresh").unwrap())
            .await
            .unwrap();
        // A directory in the temp file's place makes the next write fail.
        std::fs::create_dir(store.temp_path()).unwrap();

        let err = store
            .save_credential(&Credential::new("new-access", "new-refresh").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("old-access"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("old-refresh"));
    }

    #[tokio::test]
    async fn test_put_many_keeps_other_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put("other", "kept").await.unwrap();

        store
            .put_many(&[(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r")])
            .await
            .unwrap();

        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("kept"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("a"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("r"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(ACCESS_TOKEN_KEY, "a").await.unwrap();

        store.clear(ACCESS_TOKEN_KEY).await.unwrap();
        store.clear(ACCESS_TOKEN_KEY).await.unwrap();
        store.clear("never-set").await.unwrap();

        assert_eq!(store.load_access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_puts_keep_every_key() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.put(&format!("k{i}"), "v").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for i in 0..8 {
            assert!(store.get(&format!("k{i}")).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.get(ACCESS_TOKEN_KEY).await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(ACCESS_TOKEN_KEY, "a").await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
