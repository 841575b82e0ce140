//! # Panel Runtime
//!
//! Builds the container, wires it and owns the background tasks.
//!
//! ## Startup Sequence
//!
//! 1. Build the container (bus, credentials, controller, registry, lists)
//! 2. Register built-in actions and bind the action menu
//! 3. Bind the counter list
//! 4. Register the lock button and start the lock indicator
//! 5. Signal ready

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use shared_bus::SignalTransport;
use tl_03_pin_authentication::CredentialStore;
use tl_04_subpage_access::{LifecycleEvent, SubPageAccessApi};

use crate::container::{ContainerError, PanelContainer, RuntimeConfig};
use crate::wiring::{
    bind_action_menu, bind_counter_list, register_lock_button, register_panel_actions,
    spawn_lock_indicator,
};

/// The runtime driving one panel.
pub struct PanelRuntime {
    /// Subsystem container with all initialized services.
    container: Arc<PanelContainer>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    /// Background tasks joined on shutdown.
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PanelRuntime {
    /// Build every subsystem.
    pub async fn new(
        config: RuntimeConfig,
        transport: Arc<dyn SignalTransport>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ContainerError> {
        info!("Creating panel runtime");
        let container = Arc::new(PanelContainer::new(config, transport, store).await?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Wire the subsystems together. Call once.
    pub async fn start(&self) -> Result<(), ContainerError> {
        let c = &self.container;

        register_panel_actions(&c.registry, &c.action_menu)?;
        let buttons = bind_action_menu(&c.registry, &c.action_menu)?;
        bind_counter_list(&c.counter_list, c.config.counter_list.layout.slot_count)?;

        let lock_join = c.config.lock_join;
        register_lock_button(&c.bus, lock_join, &c.access);
        let indicator = spawn_lock_indicator(
            &c.access,
            c.lock_port.clone(),
            lock_join,
            self.shutdown_rx.clone(),
        );
        self.tasks.lock().push(indicator);

        info!(
            buttons,
            connected = c.bus.is_connected(),
            idle_timeout_secs = c.config.access.idle_timeout.as_secs(),
            credentials = %c.config.credentials_path.display(),
            "Panel runtime started"
        );
        Ok(())
    }

    /// Forward a host lifecycle notification.
    pub fn lifecycle(&self, event: LifecycleEvent) {
        info!(event = ?event, "Host lifecycle event");
        self.container.access.lifecycle(event);
    }

    /// Stop timers and background tasks.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        self.container.access.lifecycle(LifecycleEvent::Stopping);

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tasks: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                error!("Background task failed: {}", e);
            }
        }
        info!("Shutdown complete");
    }

    /// Get a reference to the subsystem container.
    pub fn container(&self) -> Arc<PanelContainer> {
        Arc::clone(&self.container)
    }
}
