//! # Tracing Transport
//!
//! Stands in for the panel link when no device driver is attached: every
//! outbound signal becomes a log line.

use shared_bus::{SignalTransport, TransportError};
use shared_types::{Signal, SignalValue};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info};

/// Transport that logs outbound signals.
pub struct TracingTransport {
    connected: AtomicBool,
    transmitted: AtomicU64,
}

impl TracingTransport {
    /// A connected transport.
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            transmitted: AtomicU64::new(0),
        }
    }

    /// Simulate the link going up or down.
    ///
    /// The bus must be told separately via `connection_changed`.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
        info!(connected, "[panel] Link state changed");
    }

    /// Signals handed to the link so far.
    pub fn transmitted(&self) -> u64 {
        self.transmitted.load(Ordering::Relaxed)
    }
}

impl Default for TracingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalTransport for TracingTransport {
    fn transmit(&self, signal: &Signal) -> Result<(), TransportError> {
        if !self.is_connected() {
            return Err(TransportError::Disconnected);
        }
        self.transmitted.fetch_add(1, Ordering::Relaxed);
        match &signal.value {
            SignalValue::Bool(value) => debug!(join = signal.address, value, "[panel] digital"),
            SignalValue::Numeric(value) => debug!(join = signal.address, value, "[panel] analog"),
            SignalValue::Text(value) => debug!(join = signal.address, %value, "[panel] serial"),
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_transmitted_signals() {
        let transport = TracingTransport::new();
        transport.transmit(&Signal::new(1, true)).unwrap();
        transport.transmit(&Signal::new(2, "text")).unwrap();
        assert_eq!(transport.transmitted(), 2);
    }

    #[test]
    fn test_offline_transmit_fails() {
        let transport = TracingTransport::new();
        transport.set_connected(false);
        assert_eq!(
            transport.transmit(&Signal::new(1, false)),
            Err(TransportError::Disconnected)
        );
        assert_eq!(transport.transmitted(), 0);
    }
}
