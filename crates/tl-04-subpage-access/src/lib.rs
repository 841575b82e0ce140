//! # TL-04 SubPage Access Controller
//!
//! Shows and hides panel subpages, gating protected ones behind the PIN
//! lock page, and relocks the panel after a period without touches.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## State Machine
//!
//! ```text
//!            PinGranted(level)                 Activity / PinGranted
//!   ┌────────┐ ───────────────→ ┌──────────────────┐ ──┐
//!   │ Locked │                  │ Unlocked(level)  │   │
//!   └────────┘ ←─────────────── └──────────────────┘ ←─┘
//!         IdleTimeout / ExplicitLock
//! ```
//!
//! | From | Event | To | Published |
//! |------|-------|----|-----------|
//! | Locked | `PinGranted(l)` | `Unlocked(l)` | `(l, user)` |
//! | Unlocked | `PinGranted(l)` | `Unlocked(l)` | `(l, user)` |
//! | any | `PinRejected` | unchanged | nothing |
//! | Unlocked | `IdleTimeout` / `ExplicitLock` | Locked | `(None, "")` once |
//!
//! ## Joins
//!
//! Each subpage owns a visibility join and a transition join. Showing
//! raises the transition join, then the visibility join; hiding lowers
//! them in reverse order. The PIN page additionally owns its keypad, an
//! error join and one indicator join per digit.
//!
//! ## Module Structure
//!
//! ```text
//! tl-04-subpage-access/
//! ├── domain/      # LockMachine, SubPage, KeypadLayout, PinEntry, errors
//! ├── ports/       # SubPageAccessApi (inbound), PinAuthorizer (outbound)
//! ├── adapters/    # ProviderAuthorizer over tl-03
//! ├── config.rs    # AccessConfig, PinLockConfig
//! └── service.rs   # SubPageAccessController
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::ProviderAuthorizer;
pub use config::{AccessConfig, PinLockConfig, ACTIVITY_JOIN_LIMIT, DEFAULT_IDLE_TIMEOUT};
pub use domain::{
    AccessError, AccessEvent, AccessState, AuthenticatedEvent, KeypadKey, KeypadLayout,
    LifecycleEvent, LockMachine, NavigationOutcome, PinEntry, SubPage, SubPageId,
};
pub use ports::{MockPinAuthorizer, PinAuthorizer, SubPageAccessApi};
pub use service::SubPageAccessController;
