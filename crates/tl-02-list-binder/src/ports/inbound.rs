//! Inbound Ports (Driving Ports / API)

use crate::domain::{BinderError, ItemAttribute, ItemId, LogicalItem};

/// Primary List Binder API.
pub trait ListBinderApi: Send + Sync {
    /// Replace the list shown by the pool.
    ///
    /// The new items are taken as given; attributes set on the previous
    /// list are not carried over. Fails before any bus write when the list
    /// cannot be bound.
    fn bind(&self, items: Vec<LogicalItem>) -> Result<(), BinderError>;

    /// Feed a press (`true`) or release (`false`) of `slot` (1-based).
    ///
    /// Returns `true` when the release activated an item callback.
    fn on_slot_press(&self, slot: usize, pressed: bool) -> Result<bool, BinderError>;

    /// Change one attribute of an item in the current list.
    ///
    /// Bound items are updated on the panel at once; unbound items carry
    /// the change until they are bound. The change lives on the item of the
    /// current list only: a later `bind` replaces every item, attributes
    /// included.
    fn set_item_attribute(&self, id: &str, attribute: ItemAttribute) -> Result<(), BinderError>;

    /// Flip the selected flag of an item and return the new value.
    fn toggle_selected(&self, id: &str) -> Result<bool, BinderError>;

    /// Move the window to start at list index `start` (windowed mode).
    fn set_window_start(&self, start: usize) -> Result<(), BinderError>;

    /// Re-send every slot's signals.
    fn refresh(&self) -> Result<(), BinderError>;

    /// Number of slots in the pool.
    fn capacity(&self) -> usize;

    /// Slot currently showing `id`.
    fn bound_slot(&self, id: &str) -> Option<usize>;

    /// Item currently shown on `slot`.
    fn item_at(&self, slot: usize) -> Option<ItemId>;
}
