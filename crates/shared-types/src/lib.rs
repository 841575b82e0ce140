//! # Shared Types Crate
//!
//! This crate contains the signal model exchanged between the controller and
//! the touch panel, plus the access-level types every subsystem agrees on.
//!
//! ## Design Principles
//!
//! - **Tagged values**: a signal carries a `SignalValue` sum type; the kind is
//!   derived from the value, never stored beside it.
//! - **Disjoint ranges**: every consumer addresses the panel through a
//!   `JoinRange` it owns exclusively (see `shared-bus`).
//! - **Ordered access**: `AuthorizationLevel::None` is always the lowest tier.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
