//! # Domain Entities
//!
//! The registered action record and its public descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback run on invocation with the optional parameter string.
pub type ActionCallback = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// One registration: a name, an optional signature and its callback.
#[derive(Clone)]
pub struct RegisteredAction {
    /// Name shown in menus.
    pub name: String,
    /// Parameter signature; `None` is the default signature.
    pub signature: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Description of the parameters the signature expects.
    pub signature_description: Option<String>,
    /// Callback to run.
    pub callback: ActionCallback,
    /// Monotonic registration order; overrides take a fresh number.
    pub sequence: u64,
}

impl RegisteredAction {
    /// True when this registration uses the default signature.
    pub fn is_default_signature(&self) -> bool {
        self.signature.is_none()
    }

    /// True when `(name, signature)` identifies this registration.
    pub fn is_keyed(&self, name: &str, signature: Option<&str>) -> bool {
        self.name == name && self.signature.as_deref() == signature
    }

    /// Public view without the callback.
    pub fn descriptor(&self) -> ActionDescriptor {
        ActionDescriptor {
            name: self.name.clone(),
            signature: self.signature.clone(),
            description: self.description.clone(),
            signature_description: self.signature_description.clone(),
        }
    }
}

impl fmt::Debug for RegisteredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredAction")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// Enumerable description of a registered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action name.
    pub name: String,
    /// Signature, `None` for the default.
    pub signature: Option<String>,
    /// Description.
    pub description: String,
    /// Parameter description.
    pub signature_description: Option<String>,
}

/// Treat blank strings as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
