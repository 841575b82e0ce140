//! # Subsystem Container
//!
//! Holds all subsystem instances of one panel.
//!
//! ## Initialization Order
//!
//! ```text
//! Phase 1: Signal bus over the transport
//! Phase 2: PIN authentication (load or create credentials)
//! Phase 3: SubPage access controller (claims page and PIN joins)
//! Phase 4: Action registry, action menu and counter list binders
//! Phase 5: Lock join
//! ```
//!
//! A failure in any phase aborts construction; joins claimed so far stay
//! claimed on that bus, which is dropped with the error.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use shared_bus::{BusError, SignalBus, SignalPort, SignalTransport};
use shared_types::JoinRange;
use tl_01_action_registry::{ActionError, ActionRegistry};
use tl_02_list_binder::{BinderError, ListBinderService};
use tl_03_pin_authentication::{AuthError, CredentialStore, PinAuthenticationProvider};
use tl_04_subpage_access::{AccessError, ProviderAuthorizer, SubPageAccessController};

use crate::container::config::RuntimeConfig;

/// Errors while building or wiring the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Credentials could not be loaded or created.
    #[error("Authentication setup failed: {0}")]
    Auth(#[from] AuthError),

    /// The access controller could not be built.
    #[error("Access controller setup failed: {0}")]
    Access(#[from] AccessError),

    /// A list binder could not be built or bound.
    #[error("List setup failed: {0}")]
    Binder(#[from] BinderError),

    /// A built-in action could not be registered.
    #[error("Action setup failed: {0}")]
    Action(#[from] ActionError),

    /// A runtime join could not be claimed.
    #[error("Bus setup failed: {0}")]
    Bus(#[from] BusError),
}

/// Central container holding all subsystem instances.
pub struct PanelContainer {
    /// Signal bus shared by every subsystem.
    pub bus: Arc<SignalBus>,

    /// PIN authentication (Subsystem 3).
    pub auth: Arc<PinAuthenticationProvider>,

    /// SubPage access controller (Subsystem 4).
    pub access: Arc<SubPageAccessController>,

    /// Action registry (Subsystem 1).
    pub registry: Arc<ActionRegistry>,

    /// Button list listing every registered action (Subsystem 2).
    pub action_menu: Arc<ListBinderService>,

    /// Reference list counting presses per item (Subsystem 2).
    pub counter_list: Arc<ListBinderService>,

    /// Port for the lock indicator join.
    pub lock_port: SignalPort,

    /// Configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl PanelContainer {
    /// Build every subsystem.
    ///
    /// Must run inside a tokio runtime; the access controller's idle timer
    /// is spawned on it.
    #[instrument(name = "panel_init", skip_all)]
    pub async fn new(
        config: RuntimeConfig,
        transport: Arc<dyn SignalTransport>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ContainerError> {
        info!("Initializing panel subsystem container");

        // =====================================================================
        // PHASE 1: Signal Bus
        // =====================================================================
        let bus = Arc::new(SignalBus::with_policy(transport, config.disconnect_policy));
        info!(policy = ?config.disconnect_policy, "Phase 1: signal bus ready");

        // =====================================================================
        // PHASE 2: PIN Authentication
        // =====================================================================
        let auth = Arc::new(PinAuthenticationProvider::new(config.auth.clone(), store));
        auth.initialize_or_create_default().await?;
        info!("Phase 2: [03] PIN authentication initialized");

        // =====================================================================
        // PHASE 3: SubPage Access
        // =====================================================================
        let authorizer = Arc::new(ProviderAuthorizer::new(Arc::clone(&auth)));
        let access = SubPageAccessController::new(config.access.clone(), authorizer, &bus)?;
        info!("Phase 3: [04] SubPage access controller initialized");

        // =====================================================================
        // PHASE 4: Actions and Lists
        // =====================================================================
        let registry = Arc::new(ActionRegistry::new());
        let action_menu = ListBinderService::new(config.action_menu.clone(), &bus)?;
        let counter_list = ListBinderService::new(config.counter_list.clone(), &bus)?;
        info!("Phase 4: [01] action registry and [02] list binders initialized");

        // =====================================================================
        // PHASE 5: Runtime Joins
        // =====================================================================
        let lock_port = bus.claim("lock-indicator", JoinRange::single(config.lock_join))?;
        info!(join = config.lock_join, "Phase 5: lock join claimed");

        Ok(Self {
            bus,
            auth,
            access,
            registry,
            action_menu,
            counter_list,
            lock_port,
            config,
        })
    }
}
