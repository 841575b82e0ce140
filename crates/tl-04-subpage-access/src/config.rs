//! # Access Controller Configuration

use crate::domain::{AccessError, KeypadLayout, SubPage};
use serde::{Deserialize, Serialize};
use shared_types::{Address, AuthorizationLevel, JoinRange};
use std::collections::HashSet;
use std::time::Duration;

/// Idle period before an unlocked panel relocks.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Presses on joins below this count as activity.
pub const ACTIVITY_JOIN_LIMIT: Address = 17_000;

/// PIN entry subpage and its joins.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinLockConfig {
    /// The PIN subpage; its required level must be `None`.
    pub page: SubPage,
    /// Keypad buttons.
    pub keypad: KeypadLayout,
    /// Bool join raised after a rejected PIN.
    pub auth_error_join: Address,
    /// One bool join per digit position, lit while entered.
    pub pin_indicator_joins: Vec<Address>,
}

impl Default for PinLockConfig {
    fn default() -> Self {
        Self {
            page: SubPage::new(101, "PinLock", 1100, AuthorizationLevel::None),
            keypad: KeypadLayout { base: 1110 },
            auth_error_join: 1101,
            pin_indicator_joins: vec![1102, 1103, 1104, 1105],
        }
    }
}

/// SubPage access controller configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Idle period before relock.
    pub idle_timeout: Duration,
    /// Bool presses inside this range reset the idle timer.
    pub activity_range: JoinRange,
    /// Buffered events per subscriber.
    pub event_capacity: usize,
    /// PIN entry page.
    pub pin_lock: PinLockConfig,
    /// Gated subpages.
    pub subpages: Vec<SubPage>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            activity_range: JoinRange::with_len(1, ACTIVITY_JOIN_LIMIT - 1)
                .unwrap_or(JoinRange::single(1)),
            event_capacity: 16,
            pin_lock: PinLockConfig::default(),
            subpages: vec![
                SubPage::new(102, "Settings", 1200, AuthorizationLevel::Level1),
                SubPage::new(103, "Service", 1300, AuthorizationLevel::Level2),
            ],
        }
    }
}

impl AccessConfig {
    /// Defaults plus a public page and a Level3 page.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config
            .subpages
            .push(SubPage::new(104, "Engineering", 1400, AuthorizationLevel::Level3));
        config
            .subpages
            .push(SubPage::new(105, "Lobby", 1500, AuthorizationLevel::None));
        config
    }

    /// Find a configured subpage, the PIN page included.
    pub fn subpage(&self, id: u32) -> Option<&SubPage> {
        if self.pin_lock.page.id == id {
            return Some(&self.pin_lock.page);
        }
        self.subpages.iter().find(|p| p.id == id)
    }

    /// Check ids and join placement.
    pub fn validate(&self) -> Result<(), AccessError> {
        let invalid = |msg: String| Err(AccessError::InvalidConfig(msg));

        if self.idle_timeout.is_zero() {
            return invalid("idle timeout must be positive".into());
        }
        if self.event_capacity == 0 {
            return invalid("event capacity must be positive".into());
        }

        let pin = &self.pin_lock;
        if pin.page.is_protected() {
            return invalid("PIN page cannot require a level".into());
        }
        let Some(controls) = pin.page.control_range() else {
            return invalid("PIN page has no control range".into());
        };
        let outputs = std::iter::once(pin.auth_error_join).chain(pin.pin_indicator_joins.iter().copied());
        for join in outputs {
            if !controls.contains(join) {
                return invalid(format!("join {join} outside PIN controls {controls}"));
            }
        }
        let keypad = pin.keypad.range();
        if !controls.contains(keypad.start()) || !controls.contains(keypad.end()) {
            return invalid(format!("keypad {keypad} outside PIN controls {controls}"));
        }

        let mut ids = HashSet::new();
        for page in std::iter::once(&pin.page).chain(&self.subpages) {
            if !ids.insert(page.id) {
                return invalid(format!("subpage id {} used twice", page.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccessConfig::default();
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
        assert!(config.activity_range.contains(16_999));
        assert!(!config.activity_range.contains(17_000));
        assert!(config.validate().is_ok());
        assert!(AccessConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_subpage_lookup() {
        let config = AccessConfig::default();
        assert_eq!(config.subpage(101).map(|p| p.name.as_str()), Some("PinLock"));
        assert_eq!(
            config.subpage(103).map(|p| p.required_level),
            Some(AuthorizationLevel::Level2)
        );
        assert!(config.subpage(999).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let mut config = AccessConfig::default();
        config.pin_lock.auth_error_join = 5;
        assert!(matches!(
            config.validate(),
            Err(AccessError::InvalidConfig(_))
        ));

        let mut config = AccessConfig::default();
        config.subpages.push(SubPage::new(101, "Dup", 1900, AuthorizationLevel::Level1));
        assert!(config.validate().is_err());

        let mut config = AccessConfig::default();
        config.pin_lock.page.required_level = AuthorizationLevel::Level1;
        assert!(config.validate().is_err());
    }
}
