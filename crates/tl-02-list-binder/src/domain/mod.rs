//! Domain module for the Pooled List Binder
//!
//! Contains the item model, slot address layout, window policy and errors.

pub mod entities;
pub mod errors;
pub mod layout;
pub mod window;

pub use entities::{BindingMode, ItemAttribute, ItemCallback, ItemId, LogicalItem};
pub(crate) use entities::SlotRecord;
pub use errors::*;
pub use layout::SlotLayout;
pub use window::{LeadingWindow, WindowPolicy};
