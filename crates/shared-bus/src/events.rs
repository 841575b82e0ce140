//! # Bus Events
//!
//! Filters for inbound signal delivery and the bus error taxonomy.

use serde::{Deserialize, Serialize};
use shared_types::{Address, JoinRange, RangeError, Signal, SignalKind};
use thiserror::Error;

/// Errors from bus operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The sender does not own the target join.
    #[error("Address range violation: {owner} sent to join {address} outside {range}")]
    AddressRangeViolation {
        owner: String,
        address: Address,
        range: JoinRange,
    },

    /// A claim intersects a range that is already owned.
    #[error("Range {range} requested by {owner} overlaps {existing} owned by {existing_owner}")]
    RangeOverlap {
        owner: String,
        range: JoinRange,
        existing_owner: String,
        existing: JoinRange,
    },

    /// The requested range is malformed.
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] RangeError),
}

/// Filter selecting which inbound signals a consumer receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalFilter {
    /// Join ranges to include. Empty means every join.
    pub ranges: Vec<JoinRange>,
    /// Kinds to include. Empty means every kind.
    pub kinds: Vec<SignalKind>,
}

impl SignalFilter {
    /// Create a filter that accepts all signals.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for one range.
    #[must_use]
    pub fn range(range: JoinRange) -> Self {
        Self {
            ranges: vec![range],
            kinds: Vec::new(),
        }
    }

    /// Create a filter for several ranges.
    #[must_use]
    pub fn ranges(ranges: Vec<JoinRange>) -> Self {
        Self {
            ranges,
            kinds: Vec::new(),
        }
    }

    /// Create a filter for a single join.
    #[must_use]
    pub fn exact(address: Address) -> Self {
        Self::range(JoinRange::single(address))
    }

    /// Restrict the filter to the given kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: Vec<SignalKind>) -> Self {
        self.kinds = kinds;
        self
    }

    /// Check if a signal matches this filter.
    #[must_use]
    pub fn matches(&self, signal: &Signal) -> bool {
        let range_match =
            self.ranges.is_empty() || self.ranges.iter().any(|r| r.contains(signal.address));

        let kind_match = self.kinds.is_empty() || self.kinds.contains(&signal.kind());

        range_match && kind_match
    }
}
