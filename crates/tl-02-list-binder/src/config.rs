//! # List Binder Configuration

use crate::domain::{BindingMode, SlotLayout};
use serde::{Deserialize, Serialize};

/// Configuration for one pooled list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListBinderConfig {
    /// Owner name used for the bus claim.
    pub owner: String,
    /// Join layout of the pool.
    pub layout: SlotLayout,
    /// Static or windowed binding.
    pub mode: BindingMode,
}

impl Default for ListBinderConfig {
    fn default() -> Self {
        Self {
            owner: "list".to_string(),
            layout: SlotLayout::default(),
            mode: BindingMode::Static,
        }
    }
}

impl ListBinderConfig {
    /// Four-slot pool at join 11, count on join 10.
    pub fn for_testing() -> Self {
        Self {
            owner: "test-list".to_string(),
            layout: SlotLayout {
                base: 11,
                slot_count: 4,
                count_address: Some(10),
                ..SlotLayout::default()
            },
            mode: BindingMode::Static,
        }
    }

    /// Same configuration in windowed mode.
    #[must_use]
    pub fn windowed(mut self) -> Self {
        self.mode = BindingMode::Windowed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ListBinderConfig::default();
        assert_eq!(config.layout.slot_count, 10);
        assert_eq!(config.mode, BindingMode::Static);
        assert!(config.layout.validate().is_ok());
    }

    #[test]
    fn test_testing_config_is_valid() {
        let config = ListBinderConfig::for_testing().windowed();
        assert_eq!(config.mode, BindingMode::Windowed);
        assert!(config.layout.validate().is_ok());
    }
}
