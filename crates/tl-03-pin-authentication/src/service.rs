//! # PIN Authentication Provider
//!
//! Application service implementing `AuthenticationApi`.
//!
//! Loading goes through the async store port; lookups only take the
//! table's read lock and never touch the store.

use crate::config::AuthConfig;
use crate::domain::{AuthError, AuthOutcome, CredentialTable};
use crate::ports::{AuthenticationApi, CredentialStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// PIN authentication provider.
pub struct PinAuthenticationProvider {
    config: AuthConfig,
    store: Arc<dyn CredentialStore>,
    table: RwLock<CredentialTable>,
}

impl PinAuthenticationProvider {
    /// Create a provider with no credentials loaded.
    pub fn new(config: AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            store,
            table: RwLock::new(CredentialTable::default()),
        }
    }

    /// Configured PIN length.
    pub fn pin_length(&self) -> usize {
        self.config.pin_length
    }

    /// `initialize`, falling back to `create_default_config` when nothing
    /// is stored.
    pub async fn initialize_or_create_default(&self) -> Result<(), AuthError> {
        match self.initialize().await {
            Err(AuthError::ConfigNotFound { location }) => {
                warn!(%location, "[tl-03] No credential configuration, creating defaults");
                self.create_default_config().await
            }
            other => other,
        }
    }

    async fn read_table(&self) -> Result<CredentialTable, AuthError> {
        let location = self.store.location();
        let exists = self
            .store
            .exists()
            .await
            .map_err(|e| AuthError::from_store(e, &location))?;
        if !exists {
            return Err(AuthError::ConfigNotFound { location });
        }

        let records = self
            .store
            .load()
            .await
            .map_err(|e| AuthError::from_store(e, &location))?;
        CredentialTable::from_records(&records, self.config.pin_length)
    }
}

#[async_trait]
impl AuthenticationApi for PinAuthenticationProvider {
    async fn initialize(&self) -> Result<(), AuthError> {
        match self.read_table().await {
            Ok(table) => {
                info!(credentials = table.len(), "[tl-03] Credentials loaded");
                *self.table.write() = table;
                Ok(())
            }
            Err(e) => {
                if matches!(e, AuthError::ConfigCorrupt(_)) {
                    error!(error = %e, "[tl-03] Credential configuration unusable");
                }
                *self.table.write() = CredentialTable::default();
                Err(e)
            }
        }
    }

    async fn create_default_config(&self) -> Result<(), AuthError> {
        let defaults = &self.config.default_credentials;
        let table = CredentialTable::from_records(defaults, self.config.pin_length)?;
        self.store
            .save(defaults)
            .await
            .map_err(|e| AuthError::from_store(e, &self.store.location()))?;

        info!(
            location = %self.store.location(),
            credentials = table.len(),
            "[tl-03] Default credentials written"
        );
        *self.table.write() = table;
        Ok(())
    }

    async fn reload(&self) -> Result<(), AuthError> {
        match self.read_table().await {
            Ok(table) => {
                info!(credentials = table.len(), "[tl-03] Credentials reloaded");
                *self.table.write() = table;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "[tl-03] Reload failed, keeping current credentials");
                Err(e)
            }
        }
    }

    fn authorize_pin(&self, pin: &str) -> AuthOutcome {
        let outcome = self.table.read().lookup(pin);
        match &outcome {
            AuthOutcome::Granted { level, label } => {
                info!(%level, user = %label, "[tl-03] PIN accepted");
            }
            AuthOutcome::Rejected => {
                debug!(digits = pin.len(), "[tl-03] PIN rejected");
            }
        }
        outcome
    }

    fn credential_count(&self) -> usize {
        self.table.read().len()
    }
}
