//! # List Flows
//!
//! Panel presses reach pooled list binders, whose item callbacks call into
//! the action registry, which in turn updates the binders.
//!
//! ## Flows Tested
//!
//! 1. Action menu built from registered names
//! 2. Menu press → registry → selection toggled on the same menu
//! 3. Newly registered actions after a menu rebind
//! 4. Menu overflow is a hard error that leaves the menu as it was
//! 5. Counter list values and a windowed list scrolled by the application

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;

    use panel_runtime::wiring::bind_action_menu;
    use tl_01_action_registry::{ActionError, ActionRegistryApi};
    use tl_02_list_binder::{
        BinderError, ListBinderApi, ListBinderConfig, ListBinderService, LogicalItem, SlotLayout,
    };

    use crate::fixtures::TestPanel;

    #[tokio::test]
    async fn test_action_menu_lists_registered_names() {
        let panel = TestPanel::start().await;
        let layout = &panel.container.config.action_menu.layout;

        assert_eq!(panel.text_at(layout.text(1)).as_deref(), Some("Action 1"));
        assert_eq!(panel.text_at(layout.text(2)).as_deref(), Some("Action 2"));
        assert_eq!(panel.bool_at(layout.visible(1)), Some(true));
        assert_eq!(panel.bool_at(layout.enable(2)), Some(true));
        assert_eq!(panel.numeric_at(layout.count_address.unwrap()), Some(2));
    }

    #[tokio::test]
    async fn test_menu_press_toggles_own_selection() {
        let panel = TestPanel::start().await;
        let layout = panel.container.config.action_menu.layout.clone();

        panel.tap(layout.press(1));
        assert_eq!(panel.bool_at(layout.selected(1)), Some(true));
        panel.tap(layout.press(1));
        assert_eq!(panel.bool_at(layout.selected(1)), Some(false));

        // A press without a release never fires.
        panel
            .container
            .bus
            .deliver(shared_types::Signal::new(layout.press(2), true));
        assert_ne!(panel.bool_at(layout.selected(2)), Some(true));
    }

    #[tokio::test]
    async fn test_parameters_pick_named_signature() {
        let panel = TestPanel::start().await;
        let registry = &panel.container.registry;
        let layout = panel.container.config.action_menu.layout.clone();

        registry.invoke("Action 2", Some("volume=3")).unwrap();
        assert_ne!(panel.bool_at(layout.selected(2)), Some(true));

        registry.invoke("Action 2", None).unwrap();
        assert_eq!(panel.bool_at(layout.selected(2)), Some(true));

        assert!(matches!(
            registry.invoke("Action 9", None),
            Err(ActionError::ActionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_rebind_shows_new_action() {
        let panel = TestPanel::start().await;
        let c = &panel.container;
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        c.registry
            .register_default(
                Arc::new(move |_: Option<&str>| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
                "Projector",
                "Toggle the projector",
            )
            .unwrap();

        assert_eq!(bind_action_menu(&c.registry, &c.action_menu).unwrap(), 3);
        panel.tap(c.config.action_menu.layout.press(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_menu_overflow_keeps_previous_menu() {
        let panel = TestPanel::start().await;
        let c = &panel.container;
        for i in 0..c.action_menu.capacity() {
            c.registry
                .register_default(Arc::new(|_: Option<&str>| {}), &format!("Extra {i}"), "")
                .unwrap();
        }

        assert!(matches!(
            bind_action_menu(&c.registry, &c.action_menu),
            Err(BinderError::CapacityExceeded { .. })
        ));
        assert_eq!(c.action_menu.item_at(1).as_deref(), Some("Action 1"));
        assert_eq!(c.action_menu.item_at(3), None);
    }

    #[tokio::test]
    async fn test_counter_list_counts_presses() {
        let panel = TestPanel::start().await;
        let layout = panel.container.config.counter_list.layout.clone();

        panel.tap(layout.press(2));
        panel.tap(layout.press(2));
        panel.tap(layout.press(1));
        assert_eq!(panel.numeric_at(layout.value(2)), Some(2));
        assert_eq!(panel.numeric_at(layout.value(1)), Some(1));
    }

    #[tokio::test]
    async fn test_windowed_list_on_panel_bus() {
        let panel = TestPanel::start().await;
        let layout = SlotLayout {
            base: 6001,
            slot_count: 3,
            count_address: Some(6000),
            ..SlotLayout::default()
        };
        let config = ListBinderConfig {
            owner: "playlist".to_string(),
            layout: layout.clone(),
            ..ListBinderConfig::default()
        }
        .windowed();
        let list = ListBinderService::new(config, &panel.container.bus).unwrap();

        let pressed = Arc::new(Mutex::new(Vec::new()));
        let items = (0..6)
            .map(|i| {
                let pressed = Arc::clone(&pressed);
                LogicalItem::new(format!("track-{i}"), format!("Track {i}"))
                    .with_callback(Arc::new(move |id: &str| pressed.lock().push(id.to_string())))
            })
            .collect();
        list.bind(items).unwrap();
        assert_eq!(panel.numeric_at(6000), Some(3));

        panel.tap(layout.press(3));
        list.set_window_start(3).unwrap();
        assert_eq!(panel.text_at(layout.text(1)).as_deref(), Some("Track 3"));
        panel.tap(layout.press(1));

        assert_eq!(*pressed.lock(), vec!["track-2", "track-3"]);
    }
}
