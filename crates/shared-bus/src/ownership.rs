//! # Range Ownership
//!
//! A `SignalPort` is the only way to put a signal on the bus. Each port is
//! bound to one claimed `JoinRange`; the bus guarantees claims are disjoint.

use crate::events::BusError;
use crate::publisher::SignalBus;
use shared_types::{Address, JoinRange, Signal, SignalValue};
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// A claimed range recorded by the bus.
#[derive(Debug, Clone)]
pub(crate) struct RangeClaim {
    pub(crate) owner: String,
    pub(crate) range: JoinRange,
}

/// Send handle scoped to one owned range.
#[derive(Clone)]
pub struct SignalPort {
    bus: Arc<SignalBus>,
    owner: Arc<str>,
    range: JoinRange,
}

impl SignalPort {
    pub(crate) fn new(bus: Arc<SignalBus>, owner: &str, range: JoinRange) -> Self {
        Self {
            bus,
            owner: Arc::from(owner),
            range,
        }
    }

    /// Owner name used in diagnostics.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The owned range.
    #[must_use]
    pub fn range(&self) -> JoinRange {
        self.range
    }

    /// The bus this port writes to.
    #[must_use]
    pub fn bus(&self) -> &Arc<SignalBus> {
        &self.bus
    }

    /// Send a value on an owned join.
    ///
    /// Fire-and-forget: `Ok` means the bus accepted the signal, not that
    /// the panel received it.
    ///
    /// # Errors
    ///
    /// `BusError::AddressRangeViolation` if `address` is outside the claim;
    /// the signal is dropped.
    pub fn send(&self, address: Address, value: impl Into<SignalValue>) -> Result<(), BusError> {
        if !self.range.contains(address) {
            error!(
                owner = %self.owner,
                address,
                range = %self.range,
                "Address range violation, signal dropped"
            );
            return Err(BusError::AddressRangeViolation {
                owner: self.owner.to_string(),
                address,
                range: self.range,
            });
        }
        self.bus.send_owned(Signal::new(address, value));
        Ok(())
    }

    /// Send several signals, stopping at the first violation.
    ///
    /// The whole batch is checked before anything is sent.
    pub fn send_all(&self, signals: Vec<Signal>) -> Result<(), BusError> {
        if let Some(bad) = signals.iter().find(|s| !self.range.contains(s.address)) {
            return self.send(bad.address, bad.value.clone());
        }
        for signal in signals {
            self.bus.send_owned(signal);
        }
        Ok(())
    }

    /// Whether the panel is online.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.bus.is_connected()
    }
}

impl fmt::Debug for SignalPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalPort")
            .field("owner", &self.owner)
            .field("range", &self.range)
            .finish()
    }
}
