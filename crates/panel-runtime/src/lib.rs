//! # Panel Runtime Library
//!
//! Composition root for one touch panel. The main entry point is the
//! `main.rs` binary; the library exposes the container and wiring so
//! integration tests can build complete panels.
//!
//! ## Module Structure
//!
//! - `container/` - Subsystem container and runtime configuration
//! - `adapters/` - Transport used when no device is attached
//! - `wiring/` - Action menu, counter list, lock button and indicator
//! - `runtime.rs` - Startup and shutdown sequence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;
pub mod runtime;
pub mod wiring;

// Re-exports
pub use container::{ConfigError, ContainerError, PanelContainer, RuntimeConfig};
pub use runtime::PanelRuntime;
