//! Outbound Ports (Driven Ports)
//!
//! The controller needs a PIN lookup and nothing else from the
//! authentication subsystem.

use shared_types::AuthorizationLevel;
use std::collections::HashMap;

/// PIN lookup (Driven Port).
pub trait PinAuthorizer: Send + Sync {
    /// `(level, label)` for a complete PIN; `(None, "")` when no match.
    fn authorize(&self, pin: &str) -> (AuthorizationLevel, String);

    /// Digits in a complete PIN.
    fn pin_length(&self) -> usize;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock PIN authorizer backed by a map.
#[derive(Debug, Clone)]
pub struct MockPinAuthorizer {
    credentials: HashMap<String, (AuthorizationLevel, String)>,
    pin_length: usize,
}

impl MockPinAuthorizer {
    /// Empty authorizer for 4-digit PINs.
    pub fn new() -> Self {
        Self {
            credentials: HashMap::new(),
            pin_length: 4,
        }
    }

    /// Add a credential.
    #[must_use]
    pub fn with_credential(mut self, pin: &str, level: AuthorizationLevel, label: &str) -> Self {
        self.credentials
            .insert(pin.to_string(), (level, label.to_string()));
        self
    }
}

impl Default for MockPinAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PinAuthorizer for MockPinAuthorizer {
    fn authorize(&self, pin: &str) -> (AuthorizationLevel, String) {
        self.credentials
            .get(pin)
            .cloned()
            .unwrap_or((AuthorizationLevel::None, String::new()))
    }

    fn pin_length(&self) -> usize {
        self.pin_length
    }
}
