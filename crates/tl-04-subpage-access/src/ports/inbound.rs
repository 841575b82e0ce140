//! Inbound Ports (Driving Ports / API)

use crate::domain::{
    AccessError, AccessState, AuthenticatedEvent, LifecycleEvent, NavigationOutcome, SubPageId,
};
use tokio::sync::broadcast;

/// Primary SubPage Access API.
pub trait SubPageAccessApi: Send + Sync {
    /// Authenticate a complete PIN.
    ///
    /// Returns the state afterwards. A rejected PIN leaves the state
    /// unchanged, re-displays the PIN page and raises the error join.
    fn pin_digits_complete(&self, pin: &str) -> AccessState;

    /// User activity. Restarts the idle timer while unlocked; returns
    /// whether it did.
    fn activity(&self) -> bool;

    /// Lock now. Returns `false` when already locked.
    fn lock(&self) -> bool;

    /// Show a subpage, or the PIN page when the level is insufficient.
    fn navigate_to(&self, subpage: SubPageId) -> Result<NavigationOutcome, AccessError>;

    /// Hide the visible subpage and forget any pending target.
    fn close(&self);

    /// Host lifecycle notification.
    fn lifecycle(&self, event: LifecycleEvent);

    /// Current state.
    fn state(&self) -> AccessState;

    /// Receive `AuthenticatedEvent`s published from now on.
    fn subscribe(&self) -> broadcast::Receiver<AuthenticatedEvent>;
}
