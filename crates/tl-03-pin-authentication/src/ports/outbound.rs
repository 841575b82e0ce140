//! Outbound Ports (Driven Ports)
//!
//! Persistence of the credential configuration. The file format is an
//! adapter concern; the provider only sees records.

use crate::domain::{CredentialRecord, StoreError};
use async_trait::async_trait;

/// Credential storage (Driven Port).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether a configuration has been stored.
    async fn exists(&self) -> Result<bool, StoreError>;

    /// Read every stored record.
    ///
    /// `StoreError::NotFound` when nothing is stored, `StoreError::Parse`
    /// when the stored data cannot be decoded.
    async fn load(&self) -> Result<Vec<CredentialRecord>, StoreError>;

    /// Replace the stored configuration.
    async fn save(&self, records: &[CredentialRecord]) -> Result<(), StoreError>;

    /// Human-readable location for diagnostics.
    fn location(&self) -> String;
}
