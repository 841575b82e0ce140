//! # Domain Entities
//!
//! Credential records as stored, credentials as held in memory, and the
//! outcome of a PIN lookup.

use serde::{Deserialize, Serialize};
use shared_types::AuthorizationLevel;
use std::fmt;
use zeroize::Zeroizing;

/// One credential as persisted by a `CredentialStore`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Fixed-length ASCII digit string.
    pub pin: String,
    /// Level granted; never `None` in a valid record.
    pub level: AuthorizationLevel,
    /// Display label, e.g. the user's role.
    pub label: String,
}

impl CredentialRecord {
    /// Build a record.
    pub fn new(pin: &str, level: AuthorizationLevel, label: &str) -> Self {
        Self {
            pin: pin.to_string(),
            level,
            label: label.to_string(),
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("pin", &"****")
            .field("level", &self.level)
            .field("label", &self.label)
            .finish()
    }
}

/// On-disk document holding every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialFile {
    /// All credentials.
    pub credentials: Vec<CredentialRecord>,
}

/// Validated in-memory credential. The PIN is wiped on drop.
pub struct Credential {
    pub(crate) pin: Zeroizing<String>,
    /// Level granted.
    pub level: AuthorizationLevel,
    /// Display label.
    pub label: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("level", &self.level)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Result of `authorize_pin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The PIN matched a credential.
    Granted {
        /// Level granted
        level: AuthorizationLevel,
        /// Credential label
        label: String,
    },
    /// No credential matched.
    Rejected,
}

impl AuthOutcome {
    /// Level granted, `None` when rejected.
    pub fn level(&self) -> AuthorizationLevel {
        match self {
            AuthOutcome::Granted { level, .. } => *level,
            AuthOutcome::Rejected => AuthorizationLevel::None,
        }
    }

    /// Label of the matched credential, empty when rejected.
    pub fn label(&self) -> &str {
        match self {
            AuthOutcome::Granted { label, .. } => label,
            AuthOutcome::Rejected => "",
        }
    }

    /// True for `Granted`.
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthOutcome::Granted { .. })
    }

    /// `(level, label)` pair; `(None, "")` when rejected.
    pub fn into_parts(self) -> (AuthorizationLevel, String) {
        match self {
            AuthOutcome::Granted { level, label } => (level, label),
            AuthOutcome::Rejected => (AuthorizationLevel::None, String::new()),
        }
    }
}
