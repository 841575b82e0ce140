//! # TL-02 Pooled List Binder
//!
//! Shows application lists of any length on a panel list control with a
//! fixed number of slots.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Slot Pool
//!
//! Slots are never created or destroyed. Each exposes enable, visible,
//! selected and press (bool), value (numeric) and text joins, addressed by
//! a [`SlotLayout`]. Only the bound item and the signal values change.
//!
//! ## Binding Modes
//!
//! | Mode | Mapping | List longer than pool |
//! |------|---------|-----------------------|
//! | `Static` | item `i` on slot `i` | `CapacityExceeded`, nothing written |
//! | `Windowed` | sticky, lowest free slot for newcomers | `WindowPolicy` picks the bound part |
//!
//! A slot given up by one item is cleared before another item uses it, so
//! no text or selection leaks from one item to the next.
//!
//! ## Activation
//!
//! An item's callback runs once per press-release cycle of its slot, on
//! the release edge, and only if the slot still shows the item that was
//! pressed. Callbacks run with no binder lock held.
//!
//! ## Module Structure
//!
//! ```text
//! tl-02-list-binder/
//! ├── domain/      # LogicalItem, SlotLayout, WindowPolicy, errors
//! ├── ports/       # ListBinderApi (inbound)
//! ├── config.rs    # ListBinderConfig
//! └── service.rs   # ListBinderService (also a bus SignalHandler)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::ListBinderConfig;
pub use domain::{
    BinderError, BindingMode, ItemAttribute, ItemCallback, ItemId, LeadingWindow, LogicalItem,
    SlotLayout, WindowPolicy,
};
pub use ports::ListBinderApi;
pub use service::ListBinderService;
