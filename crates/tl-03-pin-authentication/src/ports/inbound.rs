//! Inbound Ports (Driving Ports / API)

use crate::domain::{AuthError, AuthOutcome};
use async_trait::async_trait;

/// Primary PIN Authentication API.
#[async_trait]
pub trait AuthenticationApi: Send + Sync {
    /// Load credentials from the store.
    ///
    /// `ConfigNotFound` is recoverable through `create_default_config`;
    /// `ConfigCorrupt` leaves the provider with no credentials.
    async fn initialize(&self) -> Result<(), AuthError>;

    /// Persist the default credentials and load them.
    async fn create_default_config(&self) -> Result<(), AuthError>;

    /// Re-read the store. On failure the previous credentials stay loaded.
    async fn reload(&self) -> Result<(), AuthError>;

    /// Look up a complete PIN. In-memory; never suspends.
    fn authorize_pin(&self, pin: &str) -> AuthOutcome;

    /// Number of loaded credentials.
    fn credential_count(&self) -> usize;
}
