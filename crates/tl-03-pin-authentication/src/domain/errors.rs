//! # Domain Errors
//!
//! Error types for PIN authentication and its credential store.
//!
//! A wrong PIN is not an error; it is `AuthOutcome::Rejected`.

use thiserror::Error;

/// Provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential configuration exists yet.
    ///
    /// Recoverable: call `create_default_config`.
    #[error("Credential configuration not found at {location}")]
    ConfigNotFound {
        /// Store location (path or name)
        location: String,
    },

    /// Configuration exists but cannot be used.
    #[error("Credential configuration corrupt: {0}")]
    ConfigCorrupt(String),

    /// The store failed to read or write.
    #[error("Credential storage error: {0}")]
    Storage(String),
}

/// Errors reported by a `CredentialStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Nothing stored.
    #[error("No stored credentials")]
    NotFound,

    /// Stored data could not be decoded.
    #[error("Unreadable credentials: {0}")]
    Parse(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AuthError {
    /// Classify a store failure.
    pub fn from_store(error: StoreError, location: &str) -> Self {
        match error {
            StoreError::NotFound => AuthError::ConfigNotFound {
                location: location.to_string(),
            },
            StoreError::Parse(reason) => AuthError::ConfigCorrupt(reason),
            StoreError::Io(reason) => AuthError::Storage(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_classification() {
        assert_eq!(
            AuthError::from_store(StoreError::NotFound, "creds.json"),
            AuthError::ConfigNotFound {
                location: "creds.json".into()
            }
        );
        assert!(matches!(
            AuthError::from_store(StoreError::Parse("eof".into()), "x"),
            AuthError::ConfigCorrupt(_)
        ));
        assert!(matches!(
            AuthError::from_store(StoreError::Io("denied".into()), "x"),
            AuthError::Storage(_)
        ));
    }
}
