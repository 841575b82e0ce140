//! JSON file credential store.
//!
//! ```json
//! { "credentials": [ { "pin": "1234", "level": "Level1", "label": "Operator" } ] }
//! ```
//!
//! Saves write a sibling temp file and rename it over the target, so a
//! crash mid-save leaves the previous file intact.

use crate::domain::{CredentialFile, CredentialRecord, StoreError};
use crate::ports::CredentialStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores credentials in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn io_error(e: std::io::Error) -> StoreError {
    if e.kind() == ErrorKind::NotFound {
        StoreError::NotFound
    } else {
        StoreError::Io(e.to_string())
    }
}

#[async_trait]
impl CredentialStore for JsonFileCredentialStore {
    async fn exists(&self) -> Result<bool, StoreError> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn load(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(io_error)?;
        let file: CredentialFile =
            serde_json::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?;
        debug!(
            path = %self.path.display(),
            records = file.credentials.len(),
            "[tl-03] Credential file read"
        );
        Ok(file.credentials)
    }

    async fn save(&self, records: &[CredentialRecord]) -> Result<(), StoreError> {
        let file = CredentialFile {
            credentials: records.to_vec(),
        };
        let text =
            serde_json::to_string_pretty(&file).map_err(|e| StoreError::Parse(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, text)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        debug!(path = %self.path.display(), records = records.len(), "[tl-03] Credential file written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AuthorizationLevel;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileCredentialStore::new(dir.path().join("credentials.json"));

        assert!(!store.exists().await.unwrap());
        assert_eq!(store.load().await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_save_creates_directories_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileCredentialStore::new(dir.path().join("panel/credentials.json"));
        let records = vec![CredentialRecord::new(
            "1234",
            AuthorizationLevel::Level1,
            "Operator",
        )];

        store.save(&records).await.unwrap();
        assert!(store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap(), records);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_garbage_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileCredentialStore::new(path);
        assert!(matches!(store.load().await, Err(StoreError::Parse(_))));
    }
}
