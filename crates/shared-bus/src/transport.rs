//! # Transport Port
//!
//! The physical link to the panel is an external collaborator; the bus only
//! needs to hand it outbound signals and ask whether it is connected.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Signal, SignalKind, SignalValue};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors reported by a transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The link went down while transmitting.
    #[error("Transport disconnected")]
    Disconnected,

    /// The transport refused the signal.
    #[error("Transport rejected signal: {0}")]
    Rejected(String),
}

/// Outbound side of the panel link.
///
/// `transmit` must not block; reliability is the transport's concern.
pub trait SignalTransport: Send + Sync {
    /// Hand a signal to the link.
    fn transmit(&self, signal: &Signal) -> Result<(), TransportError>;

    /// Whether the panel is currently online.
    fn is_connected(&self) -> bool;
}

/// What the bus does with outbound signals while the panel is offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisconnectPolicy {
    /// Buffer and flush in order when the link comes back.
    #[default]
    Queue,
    /// Discard.
    Drop,
}

// =============================================================================
// Recording transport for tests and loopback wiring
// =============================================================================

/// Transport that records every transmitted signal.
pub struct RecordingTransport {
    connected: AtomicBool,
    reject: AtomicBool,
    sent: Mutex<Vec<Signal>>,
}

impl RecordingTransport {
    /// Create a connected recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            reject: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Create a transport that starts offline.
    #[must_use]
    pub fn disconnected() -> Self {
        let transport = Self::new();
        transport.set_connected(false);
        transport
    }

    /// Flip link state. The bus must still be told via `connection_changed`.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Make every subsequent transmit fail.
    pub fn set_rejecting(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Signals transmitted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Signal> {
        self.sent.lock().clone()
    }

    /// Drain the recorded signals.
    pub fn take(&self) -> Vec<Signal> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Last value transmitted on `address`, if any.
    #[must_use]
    pub fn last_value(&self, address: Address) -> Option<SignalValue> {
        self.sent
            .lock()
            .iter()
            .rev()
            .find(|s| s.address == address)
            .map(|s| s.value.clone())
    }

    /// Last value of `kind` transmitted on `address`.
    ///
    /// Join numbers are per kind, so bool 11 and text 11 are distinct.
    #[must_use]
    pub fn last_of(&self, address: Address, kind: SignalKind) -> Option<SignalValue> {
        self.sent
            .lock()
            .iter()
            .rev()
            .find(|s| s.address == address && s.kind() == kind)
            .map(|s| s.value.clone())
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalTransport for RecordingTransport {
    fn transmit(&self, signal: &Signal) -> Result<(), TransportError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(TransportError::Disconnected);
        }
        if self.reject.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected("rejecting".to_string()));
        }
        self.sent.lock().push(signal.clone());
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
    fn test_recording_transport_records() {
        let transport = RecordingTransport::new();
        transport.transmit(&Signal::new(1, true)).unwrap();
        transport.transmit(&Signal::new(1, false)).unwrap();
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(transport.last_value(1), Some(SignalValue::Bool(false)));
    }

    #[test]
    fn test_last_of_separates_kinds() {
        let transport = RecordingTransport::new();
        transport.transmit(&Signal::new(7, "label")).unwrap();
        transport.transmit(&Signal::new(7, true)).unwrap();
        assert_eq!(
            transport.last_of(7, SignalKind::Text),
            Some(SignalValue::Text("label".into()))
        );
        assert_eq!(transport.last_of(7, SignalKind::Numeric), None);
    }

    #[test]
    fn test_recording_transport_offline() {
        let transport = RecordingTransport::disconnected();
        assert!(!transport.is_connected());
        assert_eq!(
            transport.transmit(&Signal::new(1, true)),
            Err(TransportError::Disconnected)
        );
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_default_policy_is_queue() {
        assert_eq!(DisconnectPolicy::default(), DisconnectPolicy::Queue);
    }
}
