//! # Access Flows
//!
//! Keypad presses on the bus reach the access controller, which asks the
//! PIN provider, drives subpage joins and publishes authentication events
//! that the runtime mirrors onto the lock indicator.
//!
//! ## Flows Tested
//!
//! 1. Unlock by keypad, idle relock, rejected PIN while locked
//! 2. Protected navigation parked behind the PIN page
//! 3. Level escalation on an insufficient grant
//! 4. Lock button and activity from unrelated joins
//! 5. Credential file creation and reload

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::broadcast::error::TryRecvError;

    use panel_runtime::{PanelRuntime, RuntimeConfig};
    use shared_bus::RecordingTransport;
    use shared_types::AuthorizationLevel;
    use tl_03_pin_authentication::{
        AuthenticationApi, CredentialRecord, CredentialStore, JsonFileCredentialStore,
    };
    use tl_04_subpage_access::{
        AccessState, AuthenticatedEvent, NavigationOutcome, SubPageAccessApi,
    };

    use crate::fixtures::{settle, TestPanel, AUTH_ERROR_JOIN};

    const LOCK_JOIN: u32 = 100;
    const PIN_PAGE: u32 = 101;
    const SETTINGS: u32 = 102;
    const SERVICE: u32 = 103;

    // =========================================================================
    // UNLOCK / RELOCK
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_keypad_unlock_idle_relock_and_rejection() {
        let mut config = RuntimeConfig::for_testing("/unused");
        config.access.idle_timeout = Duration::from_secs(60);
        let panel = TestPanel::start_with(config).await;
        let access = Arc::clone(&panel.container.access);
        let mut events = access.subscribe();

        panel.type_pin("1234");
        settle().await;
        assert_eq!(access.state(), AccessState::Unlocked(AuthorizationLevel::Level1));
        assert_eq!(
            events.try_recv().unwrap(),
            AuthenticatedEvent {
                level: AuthorizationLevel::Level1,
                user: "Operator".into()
            }
        );
        assert_eq!(panel.bool_at(LOCK_JOIN), Some(false));

        tokio::time::sleep(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(access.state(), AccessState::Locked);
        assert_eq!(events.try_recv().unwrap(), AuthenticatedEvent::locked());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(panel.bool_at(LOCK_JOIN), Some(true));

        panel.type_pin("0000");
        assert_eq!(access.state(), AccessState::Locked);
        assert_eq!(panel.bool_at(AUTH_ERROR_JOIN), Some(true));
        assert_eq!(panel.bool_at(PIN_PAGE), Some(true));
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        panel.runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_lock_wins_over_pending_timer() {
        let panel = TestPanel::start().await;
        let access = Arc::clone(&panel.container.access);
        let mut events = access.subscribe();

        panel.type_pin("9999");
        events.try_recv().unwrap();

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(access.lock());
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(events.try_recv().unwrap(), AuthenticatedEvent::locked());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_protected_navigation_via_keypad() {
        let panel = TestPanel::start().await;
        let access = &panel.container.access;

        assert_eq!(
            access.navigate_to(SETTINGS).unwrap(),
            NavigationOutcome::PinRequired
        );
        assert_eq!(panel.bool_at(PIN_PAGE), Some(true));
        assert_ne!(panel.bool_at(SETTINGS), Some(true));

        panel.type_pin("1234");
        assert_eq!(panel.bool_at(SETTINGS), Some(true));
        assert_eq!(panel.bool_at(PIN_PAGE), Some(false));
        assert_eq!(access.visible_subpage(), Some(SETTINGS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_insufficient_grant_then_escalation() {
        let panel = TestPanel::start().await;
        let access = &panel.container.access;

        access.navigate_to(SERVICE).unwrap();
        panel.type_pin("1234");
        assert_eq!(access.level(), AuthorizationLevel::Level1);
        assert_eq!(panel.bool_at(PIN_PAGE), Some(true));
        assert_eq!(panel.bool_at(AUTH_ERROR_JOIN), Some(true));
        assert_eq!(access.pending_target(), Some(SERVICE));

        panel.type_pin("9999");
        assert_eq!(access.level(), AuthorizationLevel::Level2);
        assert_eq!(panel.bool_at(SERVICE), Some(true));
        assert_eq!(panel.bool_at(AUTH_ERROR_JOIN), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lock_button_hides_protected_page() {
        let panel = TestPanel::start().await;
        let access = &panel.container.access;
        panel.type_pin("1234");
        access.navigate_to(SETTINGS).unwrap();
        assert_eq!(panel.bool_at(SETTINGS), Some(true));

        panel.tap(LOCK_JOIN);
        settle().await;
        assert!(access.state().is_locked());
        assert_eq!(panel.bool_at(SETTINGS), Some(false));
        assert_eq!(panel.bool_at(LOCK_JOIN), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_presses_count_as_activity() {
        let panel = TestPanel::start().await;
        let access = &panel.container.access;
        let counter_press = panel.container.config.counter_list.layout.press(1);
        panel.type_pin("1234");

        tokio::time::sleep(Duration::from_secs(4)).await;
        panel.tap(counter_press);
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!access.state().is_locked());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(access.state().is_locked());
    }

    // =========================================================================
    // CREDENTIALS
    // =========================================================================

    #[tokio::test]
    async fn test_credential_file_created_then_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::for_testing(dir.path());
        let path = config.credentials_path.clone();
        let store = Arc::new(JsonFileCredentialStore::new(path.clone()));

        let runtime = PanelRuntime::new(config, Arc::new(RecordingTransport::new()), store.clone())
            .await
            .unwrap();
        runtime.start().await.unwrap();
        assert!(path.exists());

        let container = runtime.container();
        assert_eq!(
            container.auth.authorize_pin("4321").level(),
            AuthorizationLevel::Level3
        );

        store
            .save(&[CredentialRecord::new("2468", AuthorizationLevel::Level2, "Night Shift")])
            .await
            .unwrap();
        container.auth.reload().await.unwrap();

        assert_eq!(
            container.access.pin_digits_complete("2468"),
            AccessState::Unlocked(AuthorizationLevel::Level2)
        );
        assert_eq!(container.access.user(), "Night Shift");
        assert!(!container.auth.authorize_pin("1234").is_granted());

        runtime.shutdown().await;
    }
}
