//! # Runtime Configuration
//!
//! Unified configuration for every subsystem plus the runtime's own joins.
//!
//! ## Environment Overrides
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `TL_CREDENTIALS_PATH` | `credentials_path` | file path |
//! | `TL_IDLE_TIMEOUT_SECS` | `access.idle_timeout` | positive integer |
//! | `TL_DISCONNECT_POLICY` | `disconnect_policy` | `queue` or `drop` |

use shared_bus::DisconnectPolicy;
use shared_types::Address;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tl_02_list_binder::{ListBinderConfig, SlotLayout};
use tl_03_pin_authentication::AuthConfig;
use tl_04_subpage_access::AccessConfig;

/// Credential file location override.
pub const ENV_CREDENTIALS_PATH: &str = "TL_CREDENTIALS_PATH";
/// Idle timeout override in seconds.
pub const ENV_IDLE_TIMEOUT_SECS: &str = "TL_IDLE_TIMEOUT_SECS";
/// Disconnect policy override.
pub const ENV_DISCONNECT_POLICY: &str = "TL_DISCONNECT_POLICY";

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// JSON credential file.
    pub credentials_path: PathBuf,
    /// Outbound behavior while the panel is offline.
    pub disconnect_policy: DisconnectPolicy,
    /// PIN authentication.
    pub auth: AuthConfig,
    /// SubPage access and idle relock.
    pub access: AccessConfig,
    /// Button list showing every registered action.
    pub action_menu: ListBinderConfig,
    /// Reference list whose items count their presses.
    pub counter_list: ListBinderConfig,
    /// Lock button (inbound, on release) and lock indicator (outbound).
    pub lock_join: Address,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("./config/credentials.json"),
            disconnect_policy: DisconnectPolicy::Queue,
            auth: AuthConfig::default(),
            access: AccessConfig::default(),
            action_menu: ListBinderConfig {
                owner: "action-menu".to_string(),
                ..ListBinderConfig::default()
            },
            counter_list: ListBinderConfig {
                owner: "counter-list".to_string(),
                layout: SlotLayout {
                    base: 5001,
                    slot_count: 2,
                    count_address: Some(5000),
                    ..SlotLayout::default()
                },
                ..ListBinderConfig::default()
            },
            lock_join: 100,
        }
    }
}

impl RuntimeConfig {
    /// Defaults with the credential file under `dir` and a short idle period.
    pub fn for_testing(dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.credentials_path = dir.into().join("credentials.json");
        config.auth = AuthConfig::for_testing();
        config.access = AccessConfig::for_testing();
        config.access.idle_timeout = Duration::from_secs(5);
        config
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`; unset variables keep their value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CREDENTIALS_PATH) {
            self.credentials_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_IDLE_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::invalid(ENV_IDLE_TIMEOUT_SECS, &raw))?;
            self.access.idle_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_DISCONNECT_POLICY) {
            self.disconnect_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "queue" => DisconnectPolicy::Queue,
                "drop" => DisconnectPolicy::Drop,
                _ => return Err(ConfigError::invalid(ENV_DISCONNECT_POLICY, &raw)),
            };
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An override could not be parsed.
    #[error("Invalid value for {variable}: {value:?}")]
    InvalidValue {
        /// Environment variable.
        variable: &'static str,
        /// Raw value found.
        value: String,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            variable,
            value: value.to_string(),
        }
    }
}
