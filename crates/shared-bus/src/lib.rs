//! # Shared Bus - Signal Bus Between Controller and Panel
//!
//! Multiplexes typed, numerically addressed joins between the controller
//! and a touch panel.
//!
//! ## Rules
//!
//! - Every outbound signal goes through a `SignalPort` bound to a claimed
//!   `JoinRange`; sending outside the claim is an `AddressRangeViolation`.
//! - Claims never overlap and never change after configuration.
//! - Inbound changes fan out to handlers and streams whose filter covers
//!   the join, in arrival order, without coalescing.
//!
//! ```text
//!  ┌──────────────┐  send()   ┌──────────────┐  transmit()  ┌───────────┐
//!  │ SignalPort A │ ────────→ │              │ ───────────→ │           │
//!  └──────────────┘           │  SignalBus   │              │ Transport │
//!  ┌──────────────┐  handler  │              │  deliver()   │           │
//!  │  Consumer B  │ ←──────── │              │ ←─────────── │           │
//!  └──────────────┘           └──────────────┘              └───────────┘
//! ```
//!
//! ## Delivery
//!
//! - Outbound sends are fire-and-forget; while the link is down they are
//!   queued or dropped per `DisconnectPolicy`.
//! - Transport errors are logged and the signal is lost.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod ownership;
pub mod publisher;
pub mod subscriber;
pub mod transport;

// Re-export main types
pub use events::{BusError, SignalFilter};
pub use ownership::SignalPort;
pub use publisher::{BusStats, SignalBus};
pub use subscriber::{HandlerId, SignalHandler, SignalStream};
pub use transport::{DisconnectPolicy, RecordingTransport, SignalTransport, TransportError};
