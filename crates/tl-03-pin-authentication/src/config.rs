//! # Authentication Configuration

use crate::domain::CredentialRecord;
use serde::{Deserialize, Serialize};
use shared_types::AuthorizationLevel;

/// Digits in a PIN.
pub const DEFAULT_PIN_LENGTH: usize = 4;

/// PIN authentication configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Digits in every PIN.
    pub pin_length: usize,
    /// Written by `create_default_config` when no configuration exists.
    pub default_credentials: Vec<CredentialRecord>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pin_length: DEFAULT_PIN_LENGTH,
            default_credentials: vec![
                CredentialRecord::new("1234", AuthorizationLevel::Level1, "Operator"),
                CredentialRecord::new("9999", AuthorizationLevel::Level2, "Administrator"),
            ],
        }
    }
}

impl AuthConfig {
    /// Defaults plus a Level3 credential.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config
            .default_credentials
            .push(CredentialRecord::new("4321", AuthorizationLevel::Level3, "Service"));
        config
    }
}
