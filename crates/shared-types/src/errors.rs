//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while building shared value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Range start lies after its end.
    #[error("Invalid join range: start {start} > end {end}")]
    Inverted {
        /// First join requested.
        start: u32,
        /// Last join requested.
        end: u32,
    },

    /// Range would extend past the addressable join space.
    #[error("Join range overflow: {start} + {len} exceeds u32::MAX")]
    Overflow {
        /// First join requested.
        start: u32,
        /// Joins requested.
        len: u32,
    },

    /// A zero-length range cannot own any join.
    #[error("Join range must not be empty")]
    Empty,
}
