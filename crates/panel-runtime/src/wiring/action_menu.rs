//! # Action Menu
//!
//! Shows every registered action name as a button; releasing a button
//! invokes the action with no parameters.

use std::sync::Arc;

use tracing::{info, warn};

use tl_01_action_registry::{ActionRegistry, ActionRegistryApi};
use tl_02_list_binder::{BinderError, ListBinderApi, ListBinderService, LogicalItem};

/// Bind one menu button per registered action name.
///
/// Returns the number of buttons. More names than slots is a
/// `CapacityExceeded` error and leaves the menu untouched.
pub fn bind_action_menu(
    registry: &Arc<ActionRegistry>,
    menu: &ListBinderService,
) -> Result<usize, BinderError> {
    let items: Vec<LogicalItem> = registry
        .list_names()
        .into_iter()
        .map(|name| {
            let registry = Arc::clone(registry);
            LogicalItem::new(name.clone(), name).with_callback(Arc::new(move |id: &str| {
                if let Err(e) = registry.invoke(id, None) {
                    warn!(action = id, error = %e, "[panel] Menu action failed");
                }
            }))
        })
        .collect();

    let count = items.len();
    menu.bind(items)?;
    info!(buttons = count, "[panel] Action menu bound");
    Ok(count)
}
