//! # Domain Entities
//!
//! Subpages, the PIN keypad, the PIN entry buffer and published events.

use serde::{Deserialize, Serialize};
use shared_types::{Address, AuthorizationLevel, JoinRange};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Identifier of a subpage.
pub type SubPageId = u32;

/// A panel subpage and the level needed to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPage {
    /// Identifier.
    pub id: SubPageId,
    /// Name for logs.
    pub name: String,
    /// Bool join showing the subpage.
    pub visibility_join: Address,
    /// Bool join driving the show/hide transition.
    pub transition_join: Address,
    /// First bool control join.
    pub bool_offset: Address,
    /// First numeric control join.
    pub numeric_offset: Address,
    /// First text control join.
    pub text_offset: Address,
    /// Joins per kind owned by the subpage's controls.
    pub control_span: u32,
    /// Minimum level to show the subpage.
    pub required_level: AuthorizationLevel,
}

impl SubPage {
    /// Subpage whose joins all derive from `id` and `offset`.
    pub fn new(
        id: SubPageId,
        name: &str,
        offset: Address,
        required_level: AuthorizationLevel,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            visibility_join: id,
            transition_join: id,
            bool_offset: offset,
            numeric_offset: offset,
            text_offset: offset,
            control_span: 100,
            required_level,
        }
    }

    /// True when showing it requires a PIN.
    pub fn is_protected(&self) -> bool {
        self.required_level > AuthorizationLevel::None
    }

    /// Bool control range `bool_offset..bool_offset + control_span`.
    pub fn control_range(&self) -> Option<JoinRange> {
        JoinRange::with_len(self.bool_offset, self.control_span).ok()
    }
}

/// A keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    /// Digit 0-9.
    Digit(u8),
    /// Discard all entered digits.
    Clear,
    /// Discard the last digit.
    Backspace,
}

/// Keypad joins relative to `base`.
///
/// | Join | Key |
/// |------|-----|
/// | `base + 1` ..= `base + 9` | digits 1-9 |
/// | `base + 10` | digit 0 |
/// | `base + 11` | clear |
/// | `base + 12` | backspace |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadLayout {
    /// Join before digit 1.
    pub base: Address,
}

impl KeypadLayout {
    /// Key on `address`.
    pub fn key_for(&self, address: Address) -> Option<KeypadKey> {
        match address.checked_sub(self.base)? {
            offset @ 1..=9 => Some(KeypadKey::Digit(offset as u8)),
            10 => Some(KeypadKey::Digit(0)),
            11 => Some(KeypadKey::Clear),
            12 => Some(KeypadKey::Backspace),
            _ => None,
        }
    }

    /// Joins of all keys.
    pub fn range(&self) -> JoinRange {
        JoinRange::with_len(self.base.saturating_add(1), 12).unwrap_or(JoinRange::single(self.base))
    }
}

/// Digits typed so far. Wiped when cleared or dropped.
#[derive(Default)]
pub struct PinEntry {
    digits: Zeroizing<String>,
}

impl PinEntry {
    /// Append a digit unless `max` digits are already entered.
    pub fn push(&mut self, digit: u8, max: usize) -> bool {
        if self.digits.len() >= max || digit > 9 {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit.
    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    /// Remove every digit.
    pub fn clear(&mut self) {
        self.digits.zeroize();
    }

    /// Digits entered.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when nothing is entered.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Take the entered PIN, leaving the buffer empty.
    pub fn take(&mut self) -> Zeroizing<String> {
        std::mem::take(&mut self.digits)
    }
}

impl fmt::Debug for PinEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinEntry")
            .field("len", &self.digits.len())
            .finish()
    }
}

/// Published on every change of authentication.
///
/// `level == None` with an empty user means the panel locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedEvent {
    /// Level now granted.
    pub level: AuthorizationLevel,
    /// Label of the credential, empty when locked.
    pub user: String,
}

impl AuthenticatedEvent {
    /// The lock event.
    pub fn locked() -> Self {
        Self {
            level: AuthorizationLevel::None,
            user: String::new(),
        }
    }
}

/// Host process lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Program paused; timers stop.
    Paused,
    /// Program resumed; an unlocked session gets a fresh idle period.
    Resumed,
    /// Program stopping.
    Stopping,
}

/// Result of `navigate_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The subpage is now shown.
    Shown,
    /// The PIN page is shown; the target is remembered.
    PinRequired,
}
