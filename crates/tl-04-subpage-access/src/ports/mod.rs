//! Ports module for the SubPage Access Controller
//!
//! Defines inbound (API) and outbound (PIN lookup) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::SubPageAccessApi;
pub use outbound::{MockPinAuthorizer, PinAuthorizer};
