//! Adapters for PIN Authentication
//!
//! Implementations of the `CredentialStore` port.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileCredentialStore;
pub use memory::InMemoryCredentialStore;
