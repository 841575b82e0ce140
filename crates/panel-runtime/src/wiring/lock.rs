//! # Lock Button and Lock Indicator
//!
//! The lock join is both a panel button and an indicator:
//!
//! - releasing the button locks the panel at once;
//! - the controller drives the indicator high while locked.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shared_bus::{HandlerId, SignalBus, SignalFilter, SignalPort};
use shared_types::{Address, AuthorizationLevel, Signal, SignalKind};
use tl_04_subpage_access::{SubPageAccessApi, SubPageAccessController};

/// Lock the panel when the button on `join` is released.
pub fn register_lock_button(
    bus: &SignalBus,
    join: Address,
    access: &Arc<SubPageAccessController>,
) -> HandlerId {
    let access = Arc::downgrade(access);
    bus.register_handler(
        SignalFilter::exact(join).with_kinds(vec![SignalKind::Bool]),
        Arc::new(move |signal: &Signal| {
            if !signal.is_release() {
                return;
            }
            if let Some(access) = access.upgrade() {
                let locked = access.lock();
                debug!(locked, "[panel] Lock button released");
            }
        }),
    )
}

/// Mirror authentication events onto the lock indicator until shutdown.
///
/// The indicator is set from the current state before the first event.
pub fn spawn_lock_indicator(
    access: &SubPageAccessController,
    port: SignalPort,
    join: Address,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let mut events = access.subscribe();
    set_indicator(&port, join, access.state().level());

    tokio::spawn(async move {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => set_indicator(&port, join, event.level),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "[panel] Lock indicator lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = shutdown.changed() => {
                    info!("[panel] Lock indicator stopped");
                    break;
                }
            }
        }
    })
}

fn set_indicator(port: &SignalPort, join: Address, level: AuthorizationLevel) {
    let locked = level == AuthorizationLevel::None;
    if let Err(e) = port.send(join, locked) {
        warn!(join, error = %e, "[panel] Lock indicator not sent");
    }
}
