//! Ports module for PIN Authentication
//!
//! Defines inbound (API) and outbound (storage) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::AuthenticationApi;
pub use outbound::CredentialStore;
