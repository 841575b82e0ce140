//! # SubPage Access Controller Service
//!
//! Gates subpages behind the PIN lock, relocks after an idle period and
//! publishes every authentication change.
//!
//! ## Timer
//!
//! One idle timer task exists per unlocked session. Each arm bumps a
//! generation counter and a firing task only locks when its generation is
//! still current, so an explicit lock racing an expiry yields exactly one
//! lock event.
//!
//! ## Output
//!
//! Joins are never written while the session lock is held. Each operation
//! queues its signals on the session and sends them after releasing it, so
//! a transport may call back into the controller. The `output` lock keeps
//! the batches of concurrent operations in order.

use crate::config::AccessConfig;
use crate::domain::{
    AccessError, AccessEvent, AccessState, AuthenticatedEvent, KeypadKey, LifecycleEvent,
    LockMachine, NavigationOutcome, PinEntry, SubPage, SubPageId,
};
use crate::ports::{PinAuthorizer, SubPageAccessApi};
use parking_lot::{Mutex, MutexGuard, ReentrantMutex};
use shared_bus::{SignalBus, SignalFilter, SignalHandler, SignalPort};
use shared_types::{Address, AuthorizationLevel, JoinRange, Signal, SignalKind, SignalValue};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

/// Mutable session state, guarded by one mutex.
#[derive(Default)]
struct Session {
    machine: LockMachine,
    user: String,
    session_id: Option<Uuid>,
    last_activity: Option<Instant>,
    timer_generation: u64,
    timer: Option<JoinHandle<()>>,
    paused: bool,
    visible: Option<SubPageId>,
    pending_target: Option<SubPageId>,
    pin: PinEntry,
    keypad_pressed: Option<Address>,
    /// Signals waiting for the session lock to be released.
    outbox: Vec<Signal>,
}

impl Session {
    fn emit(&mut self, address: Address, value: impl Into<SignalValue>) {
        self.outbox.push(Signal::new(address, value));
    }

    fn show(&mut self, page: &SubPage) {
        self.emit(page.transition_join, true);
        self.emit(page.visibility_join, true);
        debug!(subpage = %page.name, "[tl-04] Subpage shown");
    }

    fn hide(&mut self, page: &SubPage) {
        self.emit(page.visibility_join, false);
        self.emit(page.transition_join, false);
        debug!(subpage = %page.name, "[tl-04] Subpage hidden");
    }
}

/// The SubPage Access Controller.
pub struct SubPageAccessController {
    config: AccessConfig,
    authorizer: Arc<dyn PinAuthorizer>,
    ports: Vec<SignalPort>,
    events: broadcast::Sender<AuthenticatedEvent>,
    runtime: Handle,
    me: Weak<Self>,
    /// Held across an operation and its send; reentrant for loopback.
    output: ReentrantMutex<()>,
    session: Mutex<Session>,
}

impl SubPageAccessController {
    /// Claim the subpage joins, subscribe to keypad and activity presses.
    ///
    /// Must be called from inside a tokio runtime; the idle timer runs on it.
    pub fn new(
        config: AccessConfig,
        authorizer: Arc<dyn PinAuthorizer>,
        bus: &Arc<SignalBus>,
    ) -> Result<Arc<Self>, AccessError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| AccessError::NoRuntime)?;
        let ports = claim_joins(&config, bus)?;
        let (events, _) = broadcast::channel(config.event_capacity);

        let filter = SignalFilter::ranges(vec![config.pin_lock.keypad.range(), config.activity_range])
            .with_kinds(vec![SignalKind::Bool]);

        let controller = Arc::new_cyclic(|me| Self {
            config,
            authorizer,
            ports,
            events,
            runtime,
            me: me.clone(),
            output: ReentrantMutex::new(()),
            session: Mutex::new(Session::default()),
        });
        bus.register_handler(filter, controller.clone());

        info!(
            subpages = controller.config.subpages.len(),
            idle_timeout_secs = controller.config.idle_timeout.as_secs(),
            "[tl-04] SubPage access controller ready"
        );
        Ok(controller)
    }

    /// Current authorization level.
    pub fn level(&self) -> AuthorizationLevel {
        self.session.lock().machine.state().level()
    }

    /// Label of the authenticated credential, empty when locked.
    pub fn user(&self) -> String {
        self.session.lock().user.clone()
    }

    /// Correlation id of the unlocked session.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.lock().session_id
    }

    /// Subpage currently shown by this controller.
    pub fn visible_subpage(&self) -> Option<SubPageId> {
        self.session.lock().visible
    }

    /// Subpage waiting behind the PIN page.
    pub fn pending_target(&self) -> Option<SubPageId> {
        self.session.lock().pending_target
    }

    /// Digits typed on the keypad so far.
    pub fn entered_digits(&self) -> usize {
        self.session.lock().pin.len()
    }

    /// Unlock and lock transitions since start.
    pub fn transition_counts(&self) -> (u64, u64) {
        let session = self.session.lock();
        (session.machine.unlock_count(), session.machine.lock_count())
    }

    // =========================================================================
    // SIGNAL OUTPUT
    // =========================================================================

    /// Release the session lock, then send what the operation queued.
    fn flush(&self, mut session: MutexGuard<'_, Session>) {
        let signals = std::mem::take(&mut session.outbox);
        drop(session);
        for signal in signals {
            self.send(signal);
        }
    }

    fn send(&self, signal: Signal) {
        let address = signal.address;
        let Some(port) = self.ports.iter().find(|p| p.range().contains(address)) else {
            error!(address, "[tl-04] Join not claimed by the access controller");
            return;
        };
        if let Err(e) = port.send(address, signal.value) {
            warn!(address, error = %e, "[tl-04] Subpage signal not sent");
        }
    }

    fn hide_visible(&self, session: &mut Session) {
        if let Some(page) = session.visible.take().and_then(|id| self.config.subpage(id)) {
            session.hide(page);
        }
    }

    fn show_pin_page(&self, session: &mut Session) {
        let page = &self.config.pin_lock.page;
        if session.visible != Some(page.id) {
            self.hide_visible(session);
        }
        session.show(page);
        session.visible = Some(page.id);
    }

    fn set_indicators(&self, session: &mut Session, entered: usize) {
        for (position, join) in self.config.pin_lock.pin_indicator_joins.iter().enumerate() {
            session.emit(*join, position < entered);
        }
    }

    fn set_auth_error(&self, session: &mut Session, raised: bool) {
        session.emit(self.config.pin_lock.auth_error_join, raised);
    }

    fn reset_pin(&self, session: &mut Session) {
        session.pin.clear();
        session.keypad_pressed = None;
        self.set_indicators(session, 0);
    }

    fn publish(&self, event: AuthenticatedEvent) {
        if self.events.send(event).is_err() {
            trace!("[tl-04] No authentication subscribers");
        }
    }

    // =========================================================================
    // IDLE TIMER
    // =========================================================================

    fn arm_timer(&self, session: &mut Session) {
        self.cancel_timer(session);
        session.last_activity = Some(Instant::now());
        if session.paused {
            return;
        }

        let generation = session.timer_generation;
        let timeout = self.config.idle_timeout;
        let me = self.me.clone();
        session.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(controller) = me.upgrade() {
                controller.on_idle_timeout(generation);
            }
        }));
    }

    fn cancel_timer(&self, session: &mut Session) {
        session.timer_generation = session.timer_generation.wrapping_add(1);
        if let Some(timer) = session.timer.take() {
            timer.abort();
        }
    }

    fn on_idle_timeout(&self, generation: u64) {
        let _output = self.output.lock();
        let mut session = self.session.lock();
        if session.timer_generation != generation {
            debug!(generation, "[tl-04] Stale idle timer ignored");
            return;
        }
        session.timer = None;
        let idle = session.last_activity.map(|at| at.elapsed());
        info!(idle = ?idle, "[tl-04] Idle timeout reached");
        self.lock_session(&mut session, AccessEvent::IdleTimeout);
        self.flush(session);
    }

    /// Move to `Locked`. Returns `false` when already locked.
    fn lock_session(&self, session: &mut Session, event: AccessEvent) -> bool {
        if session.machine.state().is_locked() {
            return false;
        }
        session.machine.process_event(event);
        self.cancel_timer(session);

        let protected = session
            .visible
            .and_then(|id| self.config.subpage(id))
            .filter(|page| page.is_protected());
        if let Some(page) = protected {
            session.hide(page);
            session.visible = None;
        }
        session.pending_target = None;
        self.reset_pin(session);

        session.user.clear();
        session.last_activity = None;
        let session_id = session.session_id.take();
        info!(session_id = ?session_id, reason = ?event, "[tl-04] Panel locked");
        self.publish(AuthenticatedEvent::locked());
        true
    }

    // =========================================================================
    // KEYPAD
    // =========================================================================

    /// Keys act on release, and only after a press on the same join.
    fn on_keypad(&self, address: Address, key: KeypadKey, pressed: bool) {
        let _output = self.output.lock();
        let completed = {
            let mut session = self.session.lock();
            if pressed {
                session.keypad_pressed = Some(address);
                return;
            }
            if session.keypad_pressed.take() != Some(address) {
                return;
            }
            let completed = match key {
                KeypadKey::Digit(digit) => {
                    let max = self.authorizer.pin_length();
                    if session.pin.is_empty() {
                        self.set_auth_error(&mut session, false);
                    }
                    session.pin.push(digit, max);
                    let entered = session.pin.len();
                    self.set_indicators(&mut session, entered);
                    (entered >= max).then(|| session.pin.take())
                }
                KeypadKey::Clear => {
                    session.pin.clear();
                    self.set_indicators(&mut session, 0);
                    None
                }
                KeypadKey::Backspace => {
                    session.pin.pop();
                    let entered = session.pin.len();
                    self.set_indicators(&mut session, entered);
                    None
                }
            };
            self.flush(session);
            completed
        };

        if let Some(pin) = completed {
            self.pin_digits_complete(&pin);
        }
    }
}

impl SubPageAccessApi for SubPageAccessController {
    fn pin_digits_complete(&self, pin: &str) -> AccessState {
        let (level, label) = self.authorizer.authorize(pin);

        let _output = self.output.lock();
        let mut session = self.session.lock();
        self.reset_pin(&mut session);

        if !level.is_authenticated() {
            let state = session.machine.process_event(AccessEvent::PinRejected);
            warn!(state = ?state, "[tl-04] PIN rejected");
            self.show_pin_page(&mut session);
            self.set_auth_error(&mut session, true);
            self.flush(session);
            return state;
        }

        let state = session.machine.process_event(AccessEvent::PinGranted(level));
        let session_id = Uuid::new_v4();
        session.session_id = Some(session_id);
        session.user = label.clone();
        self.arm_timer(&mut session);
        self.set_auth_error(&mut session, false);
        info!(%session_id, level = ?level, user = %label, "[tl-04] Panel unlocked");
        self.publish(AuthenticatedEvent { level, user: label });

        let pin_page = self.config.pin_lock.page.id;
        match session.pending_target.and_then(|id| self.config.subpage(id)) {
            Some(target) if level.permits(target.required_level) => {
                session.pending_target = None;
                self.hide_visible(&mut session);
                session.show(target);
                session.visible = Some(target.id);
            }
            Some(target) => {
                debug!(
                    target = %target.name,
                    required = ?target.required_level,
                    "[tl-04] Level insufficient for pending subpage"
                );
                self.set_auth_error(&mut session, true);
            }
            None => {
                if session.visible == Some(pin_page) {
                    self.hide_visible(&mut session);
                }
            }
        }
        self.flush(session);
        state
    }

    /// Sends nothing, so it never waits on the output lock.
    fn activity(&self) -> bool {
        let mut session = self.session.lock();
        if session.machine.state().is_locked() || session.paused {
            return false;
        }
        session.machine.process_event(AccessEvent::Activity);
        self.arm_timer(&mut session);
        trace!("[tl-04] Idle timer reset");
        true
    }

    fn lock(&self) -> bool {
        let _output = self.output.lock();
        let mut session = self.session.lock();
        let locked = self.lock_session(&mut session, AccessEvent::ExplicitLock);
        self.flush(session);
        locked
    }

    fn navigate_to(&self, subpage: SubPageId) -> Result<NavigationOutcome, AccessError> {
        let page = self
            .config
            .subpage(subpage)
            .ok_or(AccessError::UnknownSubPage(subpage))?;

        let _output = self.output.lock();
        let mut session = self.session.lock();
        let state = session.machine.state();

        if state.level().permits(page.required_level) {
            if session.visible != Some(page.id) {
                self.hide_visible(&mut session);
            }
            session.show(page);
            session.visible = Some(page.id);
            session.pending_target = None;
            if !state.is_locked() {
                self.arm_timer(&mut session);
            }
            self.flush(session);
            return Ok(NavigationOutcome::Shown);
        }

        info!(
            target = %page.name,
            required = ?page.required_level,
            current = ?state.level(),
            "[tl-04] PIN required"
        );
        session.pending_target = Some(page.id);
        self.reset_pin(&mut session);
        self.set_auth_error(&mut session, false);
        self.show_pin_page(&mut session);
        self.flush(session);
        Ok(NavigationOutcome::PinRequired)
    }

    fn close(&self) {
        let _output = self.output.lock();
        let mut session = self.session.lock();
        self.hide_visible(&mut session);
        session.pending_target = None;
        self.reset_pin(&mut session);
        self.flush(session);
    }

    fn lifecycle(&self, event: LifecycleEvent) {
        let mut session = self.session.lock();
        match event {
            LifecycleEvent::Paused | LifecycleEvent::Stopping => {
                session.paused = true;
                self.cancel_timer(&mut session);
            }
            LifecycleEvent::Resumed => {
                session.paused = false;
                if !session.machine.state().is_locked() {
                    self.arm_timer(&mut session);
                }
            }
        }
        debug!(event = ?event, "[tl-04] Lifecycle event");
    }

    fn state(&self) -> AccessState {
        self.session.lock().machine.state()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthenticatedEvent> {
        self.events.subscribe()
    }
}

impl SignalHandler for SubPageAccessController {
    fn on_signal(&self, signal: &Signal) {
        let Some(pressed) = signal.value.as_bool() else {
            return;
        };
        if pressed && self.config.activity_range.contains(signal.address) {
            self.activity();
        }
        if let Some(key) = self.config.pin_lock.keypad.key_for(signal.address) {
            self.on_keypad(signal.address, key, pressed);
        }
    }
}

/// One claim per distinct page join plus the PIN control block.
fn claim_joins(config: &AccessConfig, bus: &Arc<SignalBus>) -> Result<Vec<SignalPort>, AccessError> {
    let pin_page = &config.pin_lock.page;
    let mut ports = Vec::new();

    for page in std::iter::once(pin_page).chain(&config.subpages) {
        let owner = format!("subpage:{}", page.name);
        ports.push(bus.claim(&owner, JoinRange::single(page.visibility_join))?);
        if page.transition_join != page.visibility_join {
            ports.push(bus.claim(&owner, JoinRange::single(page.transition_join))?);
        }
    }

    let controls = pin_page
        .control_range()
        .ok_or_else(|| AccessError::InvalidConfig("PIN page has no control range".into()))?;
    ports.push(bus.claim("pin-lock", controls)?);
    Ok(ports)
}
