//! # Domain Errors
//!
//! Error types for the SubPage Access Controller.

use super::entities::SubPageId;
use shared_bus::BusError;
use thiserror::Error;

/// Access controller errors.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No subpage with this id is configured.
    #[error("Unknown subpage: {0}")]
    UnknownSubPage(SubPageId),

    /// Joins could not be claimed.
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    /// Configuration is inconsistent.
    #[error("Invalid access configuration: {0}")]
    InvalidConfig(String),

    /// The controller was built outside a tokio runtime.
    #[error("No tokio runtime available for the idle timer")]
    NoRuntime,
}
