//! Ports module for the List Binder
//!
//! Outbound signals go through a `shared_bus::SignalPort`; there is no
//! crate-local outbound trait.

pub mod inbound;

pub use inbound::ListBinderApi;
