//! # Bus Flows
//!
//! The signal bus as seen by a complete panel.
//!
//! ## Flows Tested
//!
//! 1. Offline panel: queued signals flushed in order on link up
//! 2. Offline panel with the drop policy
//! 3. Change streams observe every inbound transition in order
//! 4. Claims are disjoint and ports stay inside their claim

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_stream::StreamExt;

    use panel_runtime::{PanelRuntime, RuntimeConfig};
    use shared_bus::{BusError, DisconnectPolicy, RecordingTransport, SignalFilter};
    use shared_types::{JoinRange, Signal, SignalValue};
    use tl_02_list_binder::ListBinderApi;
    use tl_03_pin_authentication::InMemoryCredentialStore;

    use crate::fixtures::TestPanel;

    async fn offline_panel(policy: DisconnectPolicy) -> (Arc<RecordingTransport>, PanelRuntime) {
        let mut config = RuntimeConfig::for_testing("/unused");
        config.disconnect_policy = policy;
        let transport = Arc::new(RecordingTransport::disconnected());
        let runtime = PanelRuntime::new(
            config,
            transport.clone(),
            Arc::new(InMemoryCredentialStore::empty()),
        )
        .await
        .unwrap();
        runtime.start().await.unwrap();
        (transport, runtime)
    }

    #[tokio::test]
    async fn test_offline_panel_receives_queued_state_on_link_up() {
        let (transport, runtime) = offline_panel(DisconnectPolicy::Queue).await;
        let c = runtime.container();
        assert!(transport.sent().is_empty());
        let queued = c.bus.stats().queued;
        assert!(queued > 0);

        transport.set_connected(true);
        c.bus.connection_changed(true);

        let sent = transport.sent();
        assert_eq!(sent.len(), queued);
        assert_eq!(c.bus.stats().queued, 0);
        assert_eq!(
            transport.last_value(c.config.lock_join),
            Some(SignalValue::Bool(true))
        );
        let menu_text = c.config.action_menu.layout.text(1);
        assert!(sent
            .iter()
            .any(|s| s.address == menu_text && s.value == SignalValue::Text("Action 1".into())));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_offline_panel_drops_with_drop_policy() {
        let (transport, runtime) = offline_panel(DisconnectPolicy::Drop).await;
        let c = runtime.container();
        assert!(c.bus.stats().dropped > 0);
        assert_eq!(c.bus.stats().queued, 0);

        transport.set_connected(true);
        c.bus.connection_changed(true);
        assert!(transport.sent().is_empty());

        // Refreshing re-pushes the menu once the panel is back.
        c.action_menu.refresh().unwrap();
        assert!(!transport.sent().is_empty());

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_change_stream_sees_every_transition() {
        let panel = TestPanel::start().await;
        let press = panel.container.config.action_menu.layout.press(1);
        let mut stream = panel.container.bus.on_change(SignalFilter::exact(press));

        panel.tap(press);
        panel.tap(press);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let signal = stream.next().await.unwrap();
            seen.push(signal.value.as_bool().unwrap());
        }
        assert_eq!(seen, vec![true, false, true, false]);
        assert_eq!(stream.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_claims_are_disjoint() {
        let panel = TestPanel::start().await;
        let bus = &panel.container.bus;
        let claims = bus.claims();
        for (i, (owner, range)) in claims.iter().enumerate() {
            for (other, other_range) in &claims[i + 1..] {
                assert!(
                    !range.overlaps(other_range),
                    "{owner} {range} overlaps {other} {other_range}"
                );
            }
        }

        assert!(matches!(
            bus.claim("intruder", JoinRange::single(panel.container.config.lock_join)),
            Err(BusError::RangeOverlap { .. })
        ));
    }

    #[tokio::test]
    async fn test_port_stays_inside_claim() {
        let panel = TestPanel::start().await;
        let c = &panel.container;
        let before = panel.transport.sent().len();

        assert!(matches!(
            c.lock_port.send(c.config.lock_join + 1, true),
            Err(BusError::AddressRangeViolation { .. })
        ));
        assert_eq!(panel.transport.sent().len(), before);

        c.bus.deliver(Signal::new(c.config.lock_join, true));
        assert!(c.lock_port.send(c.config.lock_join, false).is_ok());
    }
}
