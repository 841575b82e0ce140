//! # Action Registry Service
//!
//! Application service implementing `ActionRegistryApi`.

use crate::domain::entities::non_blank;
use crate::domain::{resolve, ActionCallback, ActionDescriptor, ActionError, RegisteredAction};
use crate::ports::ActionRegistryApi;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Registry of named actions.
///
/// Callbacks run after the table lock is released, so an action may
/// itself register or invoke actions.
pub struct ActionRegistry {
    actions: RwLock<Vec<RegisteredAction>>,
    next_sequence: AtomicU64,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(Vec::new()),
            next_sequence: AtomicU64::new(1),
        }
    }

    /// Register with the default signature.
    pub fn register_default(
        &self,
        callback: ActionCallback,
        name: &str,
        description: &str,
    ) -> Result<(), ActionError> {
        self.register(callback, name, description, None, None)
    }

    /// Number of registrations (not names).
    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }

    fn run(action: &RegisteredAction, parameters: Option<&str>) {
        debug!(
            action = %action.name,
            signature = ?action.signature,
            parameters = ?parameters,
            "[tl-01] Invoking action"
        );
        (action.callback)(parameters);
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistryApi for ActionRegistry {
    fn register(
        &self,
        callback: ActionCallback,
        name: &str,
        description: &str,
        signature: Option<&str>,
        signature_description: Option<&str>,
    ) -> Result<(), ActionError> {
        if name.trim().is_empty() {
            return Err(ActionError::EmptyName);
        }
        let signature = non_blank(signature);
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let action = RegisteredAction {
            name: name.to_string(),
            signature: signature.map(str::to_string),
            description: description.to_string(),
            signature_description: non_blank(signature_description).map(str::to_string),
            callback,
            sequence,
        };

        let mut actions = self.actions.write();
        if let Some(existing) = actions.iter_mut().find(|a| a.is_keyed(name, signature)) {
            info!(action = name, signature = ?signature, "[tl-01] Action overridden");
            *existing = action;
        } else {
            info!(action = name, signature = ?signature, "[tl-01] Action registered");
            actions.push(action);
        }
        Ok(())
    }

    fn list_names(&self) -> Vec<String> {
        let actions = self.actions.read();
        let mut names: Vec<String> = Vec::new();
        for action in actions.iter() {
            if !names.contains(&action.name) {
                names.push(action.name.clone());
            }
        }
        names
    }

    fn list_actions(&self) -> Vec<ActionDescriptor> {
        self.actions
            .read()
            .iter()
            .map(RegisteredAction::descriptor)
            .collect()
    }

    fn invoke(&self, name: &str, parameters: Option<&str>) -> Result<(), ActionError> {
        let parameters = non_blank(parameters);
        let action = {
            let actions = self.actions.read();
            resolve(&actions, name, parameters.is_some()).cloned()
        };

        match action {
            Some(action) => {
                Self::run(&action, parameters);
                Ok(())
            }
            None => {
                warn!(action = name, "[tl-01] Invoke of unregistered action ignored");
                Err(ActionError::ActionNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    fn invoke_signature(
        &self,
        name: &str,
        signature: Option<&str>,
        parameters: Option<&str>,
    ) -> Result<(), ActionError> {
        let signature = non_blank(signature);
        let (action, name_known) = {
            let actions = self.actions.read();
            (
                actions.iter().find(|a| a.is_keyed(name, signature)).cloned(),
                actions.iter().any(|a| a.name == name),
            )
        };

        match action {
            Some(action) => {
                Self::run(&action, non_blank(parameters));
                Ok(())
            }
            None if name_known => Err(ActionError::SignatureNotFound {
                name: name.to_string(),
                signature: signature.map(str::to_string),
            }),
            None => {
                warn!(action = name, "[tl-01] Invoke of unregistered action ignored");
                Err(ActionError::ActionNotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, tag: &'static str) -> ActionCallback {
        let log = Arc::clone(log);
        Arc::new(move |params: Option<&str>| {
            log.lock()
                .push(format!("{tag}:{}", params.unwrap_or("no params")));
        })
    }

    #[test]
    fn test_register_and_invoke() {
        let registry = ActionRegistry::new();
        let log = Log::default();
        registry
            .register_default(recorder(&log, "a1"), "Action 1", "Action1 description")
            .unwrap();

        registry.invoke("Action 1", None).unwrap();
        assert_eq!(*log.lock(), vec!["a1:no params"]);
    }

    #[test]
    fn test_reregister_same_signature_replaces() {
        let registry = ActionRegistry::new();
        let log = Log::default();
        registry
            .register(recorder(&log, "first"), "A", "", Some("sigX"), None)
            .unwrap();
        registry
            .register(recorder(&log, "second"), "A", "", Some("sigX"), None)
            .unwrap();

        registry.invoke("A", None).unwrap();
        assert_eq!(*log.lock(), vec!["second:no params"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_names_unique_in_registration_order() {
        let registry = ActionRegistry::new();
        let log = Log::default();
        registry.register_default(recorder(&log, "1"), "Action 1", "").unwrap();
        registry.register_default(recorder(&log, "2"), "Action 2", "").unwrap();
        registry
            .register(
                recorder(&log, "2s"),
                "Action 2",
                "",
                Some("special Action 2"),
                Some("special Action2 params"),
            )
            .unwrap();
        registry.register_default(recorder(&log, "1b"), "Action 1", "").unwrap();

        assert_eq!(registry.list_names(), vec!["Action 1", "Action 2"]);
        assert_eq!(registry.list_actions().len(), 3);
    }

    #[test]
    fn test_overload_by_parameters() {
        let registry = ActionRegistry::new();
        let log = Log::default();
        registry.register_default(recorder(&log, "plain"), "Action 2", "").unwrap();
        registry
            .register(recorder(&log, "special"), "Action 2", "", Some("special"), None)
            .unwrap();

        registry.invoke("Action 2", None).unwrap();
        registry.invoke("Action 2", Some("zone=3")).unwrap();
        registry.invoke("Action 2", Some("")).unwrap();

        assert_eq!(
            *log.lock(),
            vec!["plain:no params", "special:zone=3", "plain:no params"]
        );
    }

    #[test]
    fn test_invoke_unknown_is_error() {
        let registry = ActionRegistry::new();
        assert_eq!(
            registry.invoke("missing", None),
            Err(ActionError::ActionNotFound {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_invoke_signature_exact() {
        let registry = ActionRegistry::new();
        let log = Log::default();
        registry.register_default(recorder(&log, "plain"), "A", "").unwrap();
        registry
            .register(recorder(&log, "special"), "A", "", Some("special"), None)
            .unwrap();

        registry.invoke_signature("A", Some("special"), None).unwrap();
        assert_eq!(*log.lock(), vec!["special:no params"]);

        assert!(matches!(
            registry.invoke_signature("A", Some("other"), None),
            Err(ActionError::SignatureNotFound { .. })
        ));
        assert!(matches!(
            registry.invoke_signature("B", None, None),
            Err(ActionError::ActionNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let registry = ActionRegistry::new();
        let result = registry.register_default(Arc::new(|_| {}), "  ", "");
        assert_eq!(result, Err(ActionError::EmptyName));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_callback_may_reenter_registry() {
        let registry = Arc::new(ActionRegistry::new());
        let log = Log::default();
        registry.register_default(recorder(&log, "inner"), "inner", "").unwrap();

        let reentrant = Arc::clone(&registry);
        registry
            .register_default(
                Arc::new(move |_| {
                    let _ = reentrant.invoke("inner", None);
                }),
                "outer",
                "",
            )
            .unwrap();

        registry.invoke("outer", None).unwrap();
        assert_eq!(*log.lock(), vec!["inner:no params"]);
    }
}
