//! Domain module for the SubPage Access Controller
//!
//! Contains the lock state machine, subpage and keypad entities, the PIN
//! entry buffer and errors.

pub mod entities;
pub mod errors;
pub mod lock_machine;

pub use entities::*;
pub use errors::*;
pub use lock_machine::{AccessEvent, AccessState, LockMachine};
