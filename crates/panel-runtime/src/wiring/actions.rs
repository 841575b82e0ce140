//! # Built-in Panel Actions
//!
//! | Name | Signature | Effect |
//! |------|-----------|--------|
//! | `Action 1` | default | toggle selection of its menu button |
//! | `Action 2` | default | toggle selection of its menu button |
//! | `Action 2` | `special Action 2` | log the parameters |

use std::sync::{Arc, Weak};

use tracing::{debug, info, warn};

use tl_01_action_registry::{ActionCallback, ActionError, ActionRegistry, ActionRegistryApi};
use tl_02_list_binder::{ListBinderApi, ListBinderService};

/// First built-in action.
pub const ACTION_1: &str = "Action 1";
/// Second built-in action, also registered with a named signature.
pub const ACTION_2: &str = "Action 2";
/// Named signature of `Action 2`.
pub const ACTION_2_SPECIAL: &str = "special Action 2";

/// Register the built-in actions.
///
/// The toggling actions hold the menu weakly; the menu's item callbacks
/// hold the registry.
pub fn register_panel_actions(
    registry: &ActionRegistry,
    menu: &Arc<ListBinderService>,
) -> Result<(), ActionError> {
    registry.register_default(
        toggle_selection(ACTION_1, Arc::downgrade(menu)),
        ACTION_1,
        "Toggle the selection of the Action 1 button",
    )?;
    registry.register_default(
        toggle_selection(ACTION_2, Arc::downgrade(menu)),
        ACTION_2,
        "Toggle the selection of the Action 2 button",
    )?;
    registry.register(
        Arc::new(|parameters: Option<&str>| {
            info!(parameters = parameters.unwrap_or("no params"), "[panel] Action 2 (special)");
        }),
        ACTION_2,
        "Action 2 with parameters",
        Some(ACTION_2_SPECIAL),
        Some("free-form parameter string"),
    )?;
    info!(actions = registry.len(), "[panel] Built-in actions registered");
    Ok(())
}

/// Flips the selection the menu holds for the button named `name`.
fn toggle_selection(name: &'static str, menu: Weak<ListBinderService>) -> ActionCallback {
    Arc::new(move |parameters: Option<&str>| {
        info!(action = name, parameters = parameters.unwrap_or("no params"), "[panel] Action invoked");
        let Some(menu) = menu.upgrade() else {
            return;
        };
        match menu.toggle_selected(name) {
            Ok(selected) => debug!(action = name, selected, "[panel] Menu button toggled"),
            Err(e) => warn!(action = name, error = %e, "[panel] Menu button not updated"),
        }
    })
}
