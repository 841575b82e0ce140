//! # Test Fixtures
//!
//! A started `PanelRuntime` over a `RecordingTransport` and an in-memory
//! credential store, plus helpers that act like a finger on the panel.

use std::sync::Arc;

use panel_runtime::{PanelContainer, PanelRuntime, RuntimeConfig};
use shared_bus::RecordingTransport;
use shared_types::{Address, Signal, SignalKind, SignalValue};
use tl_03_pin_authentication::InMemoryCredentialStore;

/// Keypad base of the default PIN page.
pub const KEYPAD_BASE: Address = 1110;
/// Auth error join of the default PIN page.
pub const AUTH_ERROR_JOIN: Address = 1101;

/// A running panel.
pub struct TestPanel {
    /// Records everything sent to the panel.
    pub transport: Arc<RecordingTransport>,
    /// Credential store behind the provider.
    pub store: Arc<InMemoryCredentialStore>,
    /// The runtime under test.
    pub runtime: PanelRuntime,
    /// Its container.
    pub container: Arc<PanelContainer>,
}

impl TestPanel {
    /// Start a panel with `RuntimeConfig::for_testing` (5 s idle timeout).
    pub async fn start() -> Self {
        Self::start_with(RuntimeConfig::for_testing("/unused")).await
    }

    /// Start a panel with an explicit configuration.
    pub async fn start_with(config: RuntimeConfig) -> Self {
        let transport = Arc::new(RecordingTransport::new());
        let store = Arc::new(InMemoryCredentialStore::empty());
        let runtime = PanelRuntime::new(config, transport.clone(), store.clone())
            .await
            .expect("panel builds");
        runtime.start().await.expect("panel starts");
        let container = runtime.container();
        Self {
            transport,
            store,
            runtime,
            container,
        }
    }

    /// Press and release `join`.
    pub fn tap(&self, join: Address) {
        self.container.bus.deliver(Signal::new(join, true));
        self.container.bus.deliver(Signal::new(join, false));
    }

    /// Type `pin` on the PIN keypad.
    pub fn type_pin(&self, pin: &str) {
        for digit in pin.bytes().map(|b| b - b'0') {
            let offset = if digit == 0 { 10 } else { Address::from(digit) };
            self.tap(KEYPAD_BASE + offset);
        }
    }

    /// Last bool sent on `join`.
    pub fn bool_at(&self, join: Address) -> Option<bool> {
        self.transport
            .last_of(join, SignalKind::Bool)
            .and_then(|v| v.as_bool())
    }

    /// Last numeric sent on `join`.
    pub fn numeric_at(&self, join: Address) -> Option<u16> {
        self.transport
            .last_of(join, SignalKind::Numeric)
            .and_then(|v| v.as_numeric())
    }

    /// Last text sent on `join`.
    pub fn text_at(&self, join: Address) -> Option<String> {
        match self.transport.last_of(join, SignalKind::Text) {
            Some(SignalValue::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// Let spawned tasks run.
pub async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
