//! # Touchlink Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Complete panels over a recording transport
//! └── integration/
//!     ├── access_flows.rs   # Keypad → PIN provider → controller → subpages
//!     ├── list_flows.rs     # Panel presses → binders → action registry
//!     └── bus_flows.rs      # Disconnect policy, streams, range ownership
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tl-tests
//! cargo test -p tl-tests integration::access_flows::
//! ```

pub mod fixtures;
pub mod integration;
