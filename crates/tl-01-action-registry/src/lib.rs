//! # TL-01 Action Registry
//!
//! Name-to-callback table invoked by panel buttons and list items.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Actions are registered once at startup under a name and an optional
//! parameter signature. Several signatures may share a name; the name is
//! what menus enumerate, the signature disambiguates invocation.
//!
//! ## Resolution
//!
//! | Call | Candidates | Winner |
//! |------|------------|--------|
//! | `invoke(name, None)` | default signature | most recent registration |
//! | `invoke(name, Some(p))` | named signatures | most recent registration |
//! | no exact candidate | any signature of `name` | most recent registration |
//!
//! ## Module Structure
//!
//! ```text
//! tl-01-action-registry/
//! ├── domain/      # RegisteredAction, ActionDescriptor, resolution, errors
//! ├── ports/       # ActionRegistryApi (inbound)
//! └── service.rs   # ActionRegistry
//! ```
//!
//! The registry has no bus knowledge and owns no statics; the runtime
//! container builds one and shares it behind an `Arc`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    resolve, ActionCallback, ActionDescriptor, ActionError, RegisteredAction,
};
pub use ports::ActionRegistryApi;
pub use service::ActionRegistry;
