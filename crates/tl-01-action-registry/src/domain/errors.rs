//! # Domain Errors
//!
//! Error types for the Action Registry.

use thiserror::Error;

/// Action registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No action is registered under this name.
    #[error("Action not found: {name}")]
    ActionNotFound {
        /// Requested name
        name: String,
    },

    /// The name exists but not with this signature.
    #[error("Action {name} has no signature {signature:?}")]
    SignatureNotFound {
        /// Requested name
        name: String,
        /// Requested signature (`None` is the default signature)
        signature: Option<String>,
    },

    /// Action names must not be blank.
    #[error("Action name must not be empty")]
    EmptyName,
}
