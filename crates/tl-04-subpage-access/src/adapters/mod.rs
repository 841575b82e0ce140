//! Adapters for the SubPage Access Controller

pub mod pin_provider;

pub use pin_provider::ProviderAuthorizer;
