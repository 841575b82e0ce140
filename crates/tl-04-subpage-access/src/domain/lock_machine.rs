//! Lock state machine.
//!
//! ```text
//!            pin granted(level)
//! [LOCKED] ─────────────────────→ [UNLOCKED(level)]
//!    ↑                                 │   ↺ activity, pin rejected,
//!    │                                 │     pin granted(other level)
//!    └──── idle timeout / lock() ──────┘
//! ```
//!
//! There is no terminal state. Side effects (signals, events, timers) are
//! the controller's business; this module only decides the next state.

use serde::{Deserialize, Serialize};
use shared_types::AuthorizationLevel;

/// Access state of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessState {
    /// Only level-`None` subpages are reachable.
    #[default]
    Locked,
    /// Subpages up to `level` are reachable.
    Unlocked(AuthorizationLevel),
}

impl AccessState {
    /// Level currently granted.
    pub fn level(&self) -> AuthorizationLevel {
        match self {
            AccessState::Locked => AuthorizationLevel::None,
            AccessState::Unlocked(level) => *level,
        }
    }

    /// True when locked.
    pub fn is_locked(&self) -> bool {
        matches!(self, AccessState::Locked)
    }
}

/// Inputs to the lock state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessEvent {
    /// A complete PIN matched a credential.
    PinGranted(AuthorizationLevel),
    /// A complete PIN matched nothing.
    PinRejected,
    /// User touched the panel.
    Activity,
    /// The idle timer expired.
    IdleTimeout,
    /// `lock()` was called.
    ExplicitLock,
}

/// Lock state machine with transition counters.
#[derive(Debug, Default)]
pub struct LockMachine {
    state: AccessState,
    unlock_count: u64,
    lock_count: u64,
}

impl LockMachine {
    /// Start locked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Process an event and return the new state.
    pub fn process_event(&mut self, event: AccessEvent) -> AccessState {
        let new_state = self.next_state(event);
        match (self.state.is_locked(), new_state.is_locked()) {
            (true, false) => self.unlock_count += 1,
            (false, true) => self.lock_count += 1,
            _ => {}
        }
        self.state = new_state;
        new_state
    }

    /// Pure transition function.
    fn next_state(&self, event: AccessEvent) -> AccessState {
        match (self.state, event) {
            (_, AccessEvent::PinGranted(AuthorizationLevel::None)) => self.state,
            (_, AccessEvent::PinGranted(level)) => AccessState::Unlocked(level),
            (AccessState::Unlocked(_), AccessEvent::IdleTimeout | AccessEvent::ExplicitLock) => {
                AccessState::Locked
            }
            (state, _) => state,
        }
    }

    /// Locked-to-unlocked transitions so far.
    pub fn unlock_count(&self) -> u64 {
        self.unlock_count
    }

    /// Unlocked-to-locked transitions so far.
    pub fn lock_count(&self) -> u64 {
        self.lock_count
    }
}
