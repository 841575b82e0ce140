//! # Adapter Implementations
//!
//! Concrete implementations of the outbound ports the runtime owns:
//! the panel transport for a process with no attached device.
//!
//! ```text
//! ┌──────────────┐  transmit()  ┌──────────────────┐
//! │  SignalBus   │ ───────────→ │ TracingTransport │ ──→ log
//! └──────────────┘              └──────────────────┘
//! ```

pub mod tracing_transport;

pub use tracing_transport::TracingTransport;
