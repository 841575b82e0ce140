//! Inbound Ports (Driving Ports / API)

use crate::domain::{ActionCallback, ActionDescriptor, ActionError};

/// Primary Action Registry API.
pub trait ActionRegistryApi: Send + Sync {
    /// Register `callback` under `(name, signature)`.
    ///
    /// Registering the same `(name, signature)` again replaces the earlier
    /// callback and counts as the most recent registration.
    fn register(
        &self,
        callback: ActionCallback,
        name: &str,
        description: &str,
        signature: Option<&str>,
        signature_description: Option<&str>,
    ) -> Result<(), ActionError>;

    /// Unique action names in first-registration order.
    fn list_names(&self) -> Vec<String>;

    /// Every registration, in registration order.
    fn list_actions(&self) -> Vec<ActionDescriptor>;

    /// Resolve the best signature for `name` and run it with `parameters`.
    fn invoke(&self, name: &str, parameters: Option<&str>) -> Result<(), ActionError>;

    /// Run the exact `(name, signature)` registration.
    fn invoke_signature(
        &self,
        name: &str,
        signature: Option<&str>,
        parameters: Option<&str>,
    ) -> Result<(), ActionError>;
}
