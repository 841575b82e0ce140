//! Ports module for the Action Registry
//!
//! Defines the inbound (API) port trait. The registry has no outbound
//! dependencies.

pub mod inbound;

pub use inbound::ActionRegistryApi;
