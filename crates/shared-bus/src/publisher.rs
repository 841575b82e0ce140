//! # Signal Bus
//!
//! Owns the range claims, the outbound queue and the observer registry.

use crate::events::{BusError, SignalFilter};
use crate::ownership::{RangeClaim, SignalPort};
use crate::subscriber::{HandlerEntry, HandlerId, SignalHandler, SignalStream, StreamEntry};
use crate::transport::{DisconnectPolicy, SignalTransport};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use shared_types::{Address, JoinRange, Signal};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Snapshot of bus counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Signals handed to the transport successfully.
    pub sent: u64,
    /// Signals lost (offline with `Drop`, or transport error).
    pub dropped: u64,
    /// Inbound signals dispatched.
    pub delivered: u64,
    /// Signals waiting for the link to come back.
    pub queued: usize,
}

/// Bidirectional, address-multiplexed signal bus for one panel.
pub struct SignalBus {
    /// Outbound link.
    transport: Arc<dyn SignalTransport>,

    /// Offline behaviour for outbound signals.
    policy: DisconnectPolicy,

    /// Claimed ranges, in claim order.
    claims: RwLock<Vec<RangeClaim>>,

    /// Synchronous observers.
    handlers: RwLock<Vec<HandlerEntry>>,

    /// Change streams.
    streams: Mutex<Vec<StreamEntry>>,

    /// Signals buffered while offline.
    outbound: Mutex<VecDeque<Signal>>,

    /// Serializes inbound dispatch; reentrant so a handler may deliver.
    dispatch: ReentrantMutex<()>,

    next_handler_id: AtomicU64,
    signals_sent: AtomicU64,
    signals_dropped: AtomicU64,
    signals_delivered: AtomicU64,
}

impl SignalBus {
    /// Create a bus over `transport` with the default disconnect policy.
    #[must_use]
    pub fn new(transport: Arc<dyn SignalTransport>) -> Self {
        Self::with_policy(transport, DisconnectPolicy::default())
    }

    /// Create a bus with an explicit disconnect policy.
    #[must_use]
    pub fn with_policy(transport: Arc<dyn SignalTransport>, policy: DisconnectPolicy) -> Self {
        Self {
            transport,
            policy,
            claims: RwLock::new(Vec::new()),
            handlers: RwLock::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
            outbound: Mutex::new(VecDeque::new()),
            dispatch: ReentrantMutex::new(()),
            next_handler_id: AtomicU64::new(1),
            signals_sent: AtomicU64::new(0),
            signals_dropped: AtomicU64::new(0),
            signals_delivered: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // OWNERSHIP
    // =========================================================================

    /// Claim `range` for `owner` and return the port that writes to it.
    ///
    /// # Errors
    ///
    /// `BusError::RangeOverlap` if any join of `range` is already owned.
    pub fn claim(self: &Arc<Self>, owner: &str, range: JoinRange) -> Result<SignalPort, BusError> {
        let mut claims = self.claims.write();
        if let Some(existing) = claims.iter().find(|c| c.range.overlaps(&range)) {
            warn!(
                owner,
                range = %range,
                existing_owner = %existing.owner,
                existing = %existing.range,
                "Range claim rejected"
            );
            return Err(BusError::RangeOverlap {
                owner: owner.to_string(),
                range,
                existing_owner: existing.owner.clone(),
                existing: existing.range,
            });
        }
        claims.push(RangeClaim {
            owner: owner.to_string(),
            range,
        });
        debug!(owner, range = %range, "Range claimed");
        Ok(SignalPort::new(Arc::clone(self), owner, range))
    }

    /// Owner of the claim covering `address`.
    #[must_use]
    pub fn owner_of(&self, address: Address) -> Option<String> {
        self.claims
            .read()
            .iter()
            .find(|c| c.range.contains(address))
            .map(|c| c.owner.clone())
    }

    /// All claims as `(owner, range)`, in claim order.
    #[must_use]
    pub fn claims(&self) -> Vec<(String, JoinRange)> {
        self.claims
            .read()
            .iter()
            .map(|c| (c.owner.clone(), c.range))
            .collect()
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Whether the panel is online.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// The configured disconnect policy.
    #[must_use]
    pub fn policy(&self) -> DisconnectPolicy {
        self.policy
    }

    /// Send a signal whose range was already checked by a `SignalPort`.
    pub(crate) fn send_owned(&self, signal: Signal) {
        let mut queue = self.outbound.lock();
        if self.transport.is_connected() {
            if !queue.is_empty() {
                self.flush_locked(&mut queue);
            }
            self.transmit(&signal);
            return;
        }

        match self.policy {
            DisconnectPolicy::Queue => {
                trace!(address = signal.address, "Panel offline, signal queued");
                queue.push_back(signal);
            }
            DisconnectPolicy::Drop => {
                self.signals_dropped.fetch_add(1, Ordering::Relaxed);
                debug!(address = signal.address, "Panel offline, signal dropped");
            }
        }
    }

    /// Notify the bus that the link state changed.
    ///
    /// Coming online flushes queued signals in their original order.
    pub fn connection_changed(&self, connected: bool) {
        if !connected {
            info!("Panel link down");
            return;
        }
        let mut queue = self.outbound.lock();
        info!(queued = queue.len(), "Panel link up");
        self.flush_locked(&mut queue);
    }

    fn flush_locked(&self, queue: &mut VecDeque<Signal>) {
        while let Some(signal) = queue.pop_front() {
            self.transmit(&signal);
        }
    }

    fn transmit(&self, signal: &Signal) {
        match self.transport.transmit(signal) {
            Ok(()) => {
                self.signals_sent.fetch_add(1, Ordering::Relaxed);
                trace!(address = signal.address, kind = ?signal.kind(), "Signal sent");
            }
            Err(e) => {
                // Loss is tolerated; the panel resyncs on its own refresh.
                self.signals_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(address = signal.address, error = %e, "Signal lost in transport");
            }
        }
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Register a synchronous observer for signals matching `filter`.
    pub fn register_handler(
        &self,
        filter: SignalFilter,
        handler: Arc<dyn SignalHandler>,
    ) -> HandlerId {
        let id = HandlerId(self.next_handler_id.fetch_add(1, Ordering::Relaxed));
        debug!(handler = id.0, ranges = ?filter.ranges, "Signal handler registered");
        self.handlers.write().push(HandlerEntry {
            id,
            filter,
            handler,
        });
        id
    }

    /// Open a change stream for signals matching `filter`.
    #[must_use]
    pub fn on_change(&self, filter: SignalFilter) -> SignalStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.streams.lock().push(StreamEntry {
            filter: filter.clone(),
            sender,
        });
        SignalStream::new(receiver, filter)
    }

    /// Dispatch an inbound change from the transport.
    ///
    /// Handlers run first, in registration order, then streams are fed.
    pub fn deliver(&self, signal: Signal) {
        let _ordered = self.dispatch.lock();
        self.signals_delivered.fetch_add(1, Ordering::Relaxed);
        trace!(address = signal.address, value = ?signal.value, "Signal received");

        let matching: Vec<(HandlerId, Arc<dyn SignalHandler>)> = self
            .handlers
            .read()
            .iter()
            .filter(|h| h.filter.matches(&signal))
            .map(|h| (h.id, Arc::clone(&h.handler)))
            .collect();

        for (id, handler) in matching {
            trace!(handler = id.0, address = signal.address, "Dispatching");
            handler.on_signal(&signal);
        }

        self.streams.lock().retain(|entry| {
            if !entry.filter.matches(&signal) {
                return true;
            }
            // Receiver dropped: prune the entry.
            entry.sender.send(signal.clone()).is_ok()
        });
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        BusStats {
            sent: self.signals_sent.load(Ordering::Relaxed),
            dropped: self.signals_dropped.load(Ordering::Relaxed),
            delivered: self.signals_delivered.load(Ordering::Relaxed),
            queued: self.outbound.lock().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;

    fn setup(policy: DisconnectPolicy) -> (Arc<SignalBus>, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let bus = Arc::new(SignalBus::with_policy(transport.clone(), policy));
        (bus, transport)
    }

    #[test]
    fn test_claims_must_be_disjoint() {
        let (bus, _) = setup(DisconnectPolicy::Queue);
        bus.claim("a", JoinRange::new(1, 10).unwrap()).unwrap();
        bus.claim("b", JoinRange::new(11, 20).unwrap()).unwrap();

        let err = bus.claim("c", JoinRange::new(20, 30).unwrap()).unwrap_err();
        assert!(matches!(err, BusError::RangeOverlap { existing_owner, .. } if existing_owner == "b"));
        assert_eq!(bus.claims().len(), 2);
        assert_eq!(bus.owner_of(5).as_deref(), Some("a"));
        assert_eq!(bus.owner_of(25), None);
    }

    #[test]
    fn test_offline_queue_flushes_in_order() {
        let (bus, transport) = setup(DisconnectPolicy::Queue);
        let port = bus.claim("p", JoinRange::new(1, 10).unwrap()).unwrap();

        transport.set_connected(false);
        port.send(1, true).unwrap();
        port.send(2, "x").unwrap();
        assert_eq!(bus.stats().queued, 2);
        assert!(transport.sent().is_empty());

        transport.set_connected(true);
        bus.connection_changed(true);

        let sent = transport.sent();
        assert_eq!(sent, vec![Signal::new(1, true), Signal::new(2, "x")]);
        assert_eq!(bus.stats().queued, 0);
        assert_eq!(bus.stats().sent, 2);
    }

    #[test]
    fn test_queue_flushed_before_next_send() {
        let (bus, transport) = setup(DisconnectPolicy::Queue);
        let port = bus.claim("p", JoinRange::new(1, 10).unwrap()).unwrap();

        transport.set_connected(false);
        port.send(1, true).unwrap();
        transport.set_connected(true);
        port.send(2, true).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].address, 1);
        assert_eq!(sent[1].address, 2);
    }

    #[test]
    fn test_offline_drop_policy() {
        let (bus, transport) = setup(DisconnectPolicy::Drop);
        let port = bus.claim("p", JoinRange::new(1, 10).unwrap()).unwrap();

        transport.set_connected(false);
        port.send(1, true).unwrap();
        transport.set_connected(true);
        bus.connection_changed(true);

        assert!(transport.sent().is_empty());
        assert_eq!(bus.stats().dropped, 1);
    }

    #[test]
    fn test_transport_error_is_tolerated() {
        let (bus, transport) = setup(DisconnectPolicy::Queue);
        let port = bus.claim("p", JoinRange::new(1, 10).unwrap()).unwrap();

        transport.set_rejecting(true);
        assert!(port.send(1, true).is_ok());
        assert_eq!(bus.stats().dropped, 1);
        assert_eq!(bus.stats().sent, 0);
    }

    #[test]
    fn test_handlers_dispatch_in_order() {
        let (bus, _) = setup(DisconnectPolicy::Queue);
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        bus.register_handler(
            SignalFilter::all(),
            Arc::new(move |s: &Signal| first.lock().push(("first", s.address))),
        );
        let second = Arc::clone(&log);
        bus.register_handler(
            SignalFilter::range(JoinRange::new(1, 5).unwrap()),
            Arc::new(move |s: &Signal| second.lock().push(("second", s.address))),
        );

        bus.deliver(Signal::new(3, true));
        bus.deliver(Signal::new(8, true));

        assert_eq!(
            *log.lock(),
            vec![("first", 3), ("second", 3), ("first", 8)]
        );
        assert_eq!(bus.stats().delivered, 2);
    }

    #[test]
    fn test_handler_may_reenter_bus() {
        let (bus, transport) = setup(DisconnectPolicy::Queue);
        let port = bus.claim("echo", JoinRange::new(100, 100).unwrap()).unwrap();

        bus.register_handler(
            SignalFilter::exact(1),
            Arc::new(move |s: &Signal| {
                let _ = port.send(100, s.value.clone());
            }),
        );

        bus.deliver(Signal::new(1, true));
        assert_eq!(transport.sent(), vec![Signal::new(100, true)]);
    }

    #[test]
    fn test_dropped_stream_is_pruned() {
        let (bus, _) = setup(DisconnectPolicy::Queue);
        let stream = bus.on_change(SignalFilter::all());
        drop(stream);

        bus.deliver(Signal::new(1, true));
        assert!(bus.streams.lock().is_empty());
    }
}
