//! `PinAuthorizer` backed by the PIN authentication provider.

use crate::ports::PinAuthorizer;
use shared_types::AuthorizationLevel;
use std::sync::Arc;
use tl_03_pin_authentication::{AuthenticationApi, PinAuthenticationProvider};

/// Adapter from [`PinAuthenticationProvider`] to [`PinAuthorizer`].
pub struct ProviderAuthorizer {
    provider: Arc<PinAuthenticationProvider>,
}

impl ProviderAuthorizer {
    /// Wrap a shared provider.
    pub fn new(provider: Arc<PinAuthenticationProvider>) -> Self {
        Self { provider }
    }
}

impl PinAuthorizer for ProviderAuthorizer {
    fn authorize(&self, pin: &str) -> (AuthorizationLevel, String) {
        self.provider.authorize_pin(pin).into_parts()
    }

    fn pin_length(&self) -> usize {
        self.provider.pin_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_03_pin_authentication::{AuthConfig, InMemoryCredentialStore};

    #[tokio::test]
    async fn test_adapter_forwards_lookup() {
        let store = Arc::new(InMemoryCredentialStore::empty());
        let provider = Arc::new(PinAuthenticationProvider::new(AuthConfig::default(), store));
        provider.create_default_config().await.unwrap();

        let authorizer = ProviderAuthorizer::new(provider);
        assert_eq!(authorizer.pin_length(), 4);
        assert_eq!(
            authorizer.authorize("1234"),
            (AuthorizationLevel::Level1, "Operator".to_string())
        );
        assert_eq!(
            authorizer.authorize("1111"),
            (AuthorizationLevel::None, String::new())
        );
    }
}
