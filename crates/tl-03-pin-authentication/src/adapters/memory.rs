//! In-memory credential store for tests and ephemeral panels.

use crate::domain::{CredentialRecord, StoreError};
use crate::ports::CredentialStore;
use async_trait::async_trait;
use parking_lot::Mutex;

enum Contents {
    Empty,
    Records(Vec<CredentialRecord>),
    Unreadable(String),
}

/// Credential store held in memory.
pub struct InMemoryCredentialStore {
    contents: Mutex<Contents>,
    fail_writes: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    /// Store with nothing saved.
    pub fn empty() -> Self {
        Self {
            contents: Mutex::new(Contents::Empty),
            fail_writes: Mutex::new(None),
        }
    }

    /// Store preloaded with `records`.
    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        let store = Self::empty();
        store.replace(records);
        store
    }

    /// Store whose contents cannot be decoded.
    pub fn unreadable(reason: &str) -> Self {
        let store = Self::empty();
        *store.contents.lock() = Contents::Unreadable(reason.to_string());
        store
    }

    /// Overwrite the stored records out of band.
    pub fn replace(&self, records: Vec<CredentialRecord>) {
        *self.contents.lock() = Contents::Records(records);
    }

    /// Make subsequent saves fail with `reason`.
    pub fn fail_writes(&self, reason: &str) {
        *self.fail_writes.lock() = Some(reason.to_string());
    }

    /// Currently stored records.
    pub fn records(&self) -> Option<Vec<CredentialRecord>> {
        match &*self.contents.lock() {
            Contents::Records(records) => Some(records.clone()),
            _ => None,
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn exists(&self) -> Result<bool, StoreError> {
        Ok(!matches!(*self.contents.lock(), Contents::Empty))
    }

    async fn load(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        match &*self.contents.lock() {
            Contents::Empty => Err(StoreError::NotFound),
            Contents::Records(records) => Ok(records.clone()),
            Contents::Unreadable(reason) => Err(StoreError::Parse(reason.clone())),
        }
    }

    async fn save(&self, records: &[CredentialRecord]) -> Result<(), StoreError> {
        if let Some(reason) = self.fail_writes.lock().clone() {
            return Err(StoreError::Io(reason));
        }
        self.replace(records.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
