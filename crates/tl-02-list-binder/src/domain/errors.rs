//! # Domain Errors
//!
//! Error types for the Pooled List Binder.

use shared_bus::BusError;
use thiserror::Error;

/// List binder errors.
#[derive(Debug, Error)]
pub enum BinderError {
    /// Static binding asked for more items than the pool has slots.
    #[error("Capacity exceeded: {requested} items for {capacity} slots")]
    CapacityExceeded {
        /// Items in the bind request
        requested: usize,
        /// Slots in the pool
        capacity: usize,
    },

    /// No item with this id is in the current list.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// The same id appears twice in one list.
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Slot number outside `1..=capacity`.
    #[error("Invalid slot {slot} (pool has {capacity} slots)")]
    InvalidSlot {
        /// Requested slot
        slot: usize,
        /// Slots in the pool
        capacity: usize,
    },

    /// Slot layout cannot address the pool without collisions.
    #[error("Invalid slot layout: {0}")]
    InvalidLayout(String),

    /// Bus rejected a write.
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),
}
