//! # Counter List
//!
//! Reference list whose items show how often they were pressed.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Weak};

use tracing::{debug, warn};

use tl_02_list_binder::{BinderError, ItemAttribute, ListBinderApi, ListBinderService, LogicalItem};

/// Bind `count` items labelled `1..=count`, each counting its activations
/// in its numeric value.
pub fn bind_counter_list(list: &Arc<ListBinderService>, count: usize) -> Result<(), BinderError> {
    let items = (1..=count)
        .map(|index| {
            let id = index.to_string();
            let presses = AtomicU16::new(0);
            let list: Weak<ListBinderService> = Arc::downgrade(list);
            LogicalItem::new(id.clone(), id).with_callback(Arc::new(move |id: &str| {
                let value = presses.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
                debug!(item = id, value, "[panel] Counter item pressed");
                let Some(list) = list.upgrade() else {
                    return;
                };
                if let Err(e) = list.set_item_attribute(id, ItemAttribute::Value(value)) {
                    warn!(item = id, error = %e, "[panel] Counter not updated");
                }
            }))
        })
        .collect();
    list.bind(items)
}
