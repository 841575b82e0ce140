//! # List Binder Service
//!
//! Maps a logical item list onto the fixed slot pool and turns slot
//! presses back into item activations.
//!
//! All slot writes of one operation are assembled first and handed to the
//! bus as a single checked batch, so a failed operation leaves the panel
//! untouched.

use crate::config::ListBinderConfig;
use crate::domain::window::clamp;
use crate::domain::{
    BinderError, BindingMode, ItemAttribute, ItemId, LeadingWindow, LogicalItem, SlotRecord,
    WindowPolicy,
};
use crate::ports::ListBinderApi;
use parking_lot::Mutex;
use shared_bus::{SignalBus, SignalFilter, SignalHandler, SignalPort};
use shared_types::{Signal, SignalKind};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct BinderState {
    /// The whole list, bound or not.
    items: Vec<LogicalItem>,
    /// Index `i` is slot `i + 1`.
    slots: Vec<SlotRecord>,
    window_start: usize,
}

impl BinderState {
    fn bound_count(&self) -> usize {
        self.slots.iter().filter(|r| r.item.is_some()).count()
    }
}

/// Pooled list binder bound to one claimed join range.
pub struct ListBinderService {
    config: ListBinderConfig,
    port: SignalPort,
    policy: Box<dyn WindowPolicy>,
    state: Mutex<BinderState>,
}

impl ListBinderService {
    /// Claim the pool's joins on `bus` and register for its presses.
    pub fn new(config: ListBinderConfig, bus: &Arc<SignalBus>) -> Result<Arc<Self>, BinderError> {
        Self::with_policy(config, bus, Box::new(LeadingWindow))
    }

    /// Same as [`ListBinderService::new`] with a custom window policy.
    pub fn with_policy(
        config: ListBinderConfig,
        bus: &Arc<SignalBus>,
        policy: Box<dyn WindowPolicy>,
    ) -> Result<Arc<Self>, BinderError> {
        config.layout.validate()?;
        let port = bus.claim(&config.owner, config.layout.range()?)?;
        let filter = SignalFilter::range(config.layout.press_range()?)
            .with_kinds(vec![SignalKind::Bool]);
        let capacity = config.layout.slot_count;

        info!(
            owner = %config.owner,
            range = %port.range(),
            capacity,
            mode = ?config.mode,
            "[tl-02] List binder created"
        );

        let service = Arc::new(Self {
            config,
            port,
            policy,
            state: Mutex::new(BinderState {
                items: Vec::new(),
                slots: vec![SlotRecord::default(); capacity],
                window_start: 0,
            }),
        });
        bus.register_handler(filter, service.clone());
        Ok(service)
    }

    /// Binding mode.
    pub fn mode(&self) -> BindingMode {
        self.config.mode
    }

    /// `(slot, item)` for every bound slot, in slot order.
    pub fn assignments(&self) -> Vec<(usize, ItemId)> {
        self.state
            .lock()
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, r)| r.item.clone().map(|id| (index + 1, id)))
            .collect()
    }

    // =========================================================================
    // SIGNAL ASSEMBLY
    // =========================================================================

    fn item_signals(&self, slot: usize, item: &LogicalItem) -> [Signal; 5] {
        let layout = &self.config.layout;
        [
            Signal::new(layout.text(slot), item.text.as_str()),
            Signal::new(layout.value(slot), item.value),
            Signal::new(layout.selected(slot), item.selected),
            Signal::new(layout.enable(slot), item.enabled),
            Signal::new(layout.visible(slot), item.visible),
        ]
    }

    fn cleared_signals(&self, slot: usize) -> [Signal; 5] {
        let layout = &self.config.layout;
        [
            Signal::new(layout.visible(slot), false),
            Signal::new(layout.enable(slot), false),
            Signal::new(layout.selected(slot), false),
            Signal::new(layout.value(slot), 0u16),
            Signal::new(layout.text(slot), ""),
        ]
    }

    fn attribute_signal(&self, slot: usize, attribute: &ItemAttribute) -> Signal {
        let layout = &self.config.layout;
        match attribute {
            ItemAttribute::Text(text) => Signal::new(layout.text(slot), text.as_str()),
            ItemAttribute::Value(value) => Signal::new(layout.value(slot), *value),
            ItemAttribute::Enabled(on) => Signal::new(layout.enable(slot), *on),
            ItemAttribute::Visible(on) => Signal::new(layout.visible(slot), *on),
            ItemAttribute::Selected(on) => Signal::new(layout.selected(slot), *on),
        }
    }

    fn count_signal(&self, count: usize) -> Option<Signal> {
        self.config
            .layout
            .count_address
            .map(|address| Signal::new(address, u16::try_from(count).unwrap_or(u16::MAX)))
    }

    // =========================================================================
    // ASSIGNMENT
    // =========================================================================

    /// Item `i` on slot `i + 1`; every other slot cleared.
    fn assign_static(&self, state: &mut BinderState) -> Vec<Signal> {
        let mut signals = Vec::new();
        for (index, record) in state.slots.iter_mut().enumerate() {
            match state.items.get(index) {
                Some(item) => {
                    record.rebind(item);
                    signals.extend(self.item_signals(index + 1, item));
                }
                None => {
                    *record = SlotRecord::default();
                    signals.extend(self.cleared_signals(index + 1));
                }
            }
        }
        signals.extend(self.count_signal(state.items.len()));
        signals
    }

    /// Sticky assignment of the current window.
    ///
    /// Slots whose item left the window are cleared first; newcomers then
    /// take the lowest free slot.
    fn assign_windowed(&self, state: &mut BinderState) -> Vec<Signal> {
        let capacity = state.slots.len();
        let total = state.items.len();
        let window = clamp(
            self.policy.window(total, capacity, state.window_start),
            total,
            capacity,
        );
        let in_window = &state.items[window];
        let wanted: HashSet<&str> = in_window.iter().map(|i| i.id.as_str()).collect();

        let mut signals = Vec::new();
        for (index, record) in state.slots.iter_mut().enumerate() {
            let leaving = record
                .item
                .as_deref()
                .is_some_and(|id| !wanted.contains(id));
            if leaving {
                debug!(slot = index + 1, item = ?record.item, "[tl-02] Slot released");
                *record = SlotRecord::default();
                signals.extend(self.cleared_signals(index + 1));
            }
        }

        for item in in_window {
            let existing = state.slots.iter().position(|r| r.is_bound_to(&item.id));
            let Some(index) = existing.or_else(|| state.slots.iter().position(|r| r.item.is_none()))
            else {
                warn!(item = %item.id, "[tl-02] No free slot for windowed item");
                continue;
            };
            state.slots[index].rebind(item);
            signals.extend(self.item_signals(index + 1, item));
        }

        signals.extend(self.count_signal(state.bound_count()));
        signals
    }

    /// Record `attribute` on the item and push it if the item is bound.
    fn apply_attribute(
        &self,
        state: &mut BinderState,
        id: &str,
        attribute: ItemAttribute,
    ) -> Result<(), BinderError> {
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BinderError::UnknownItem(id.to_string()))?;
        item.apply(&attribute);

        let Some(index) = state.slots.iter().position(|r| r.is_bound_to(id)) else {
            debug!(item = id, ?attribute, "[tl-02] Attribute deferred until bound");
            return Ok(());
        };
        if let ItemAttribute::Enabled(on) = &attribute {
            state.slots[index].enabled = *on;
        }
        self.port
            .send_all(vec![self.attribute_signal(index + 1, &attribute)])?;
        Ok(())
    }

    fn assign(&self, state: &mut BinderState) -> Vec<Signal> {
        match self.config.mode {
            BindingMode::Static => self.assign_static(state),
            BindingMode::Windowed => self.assign_windowed(state),
        }
    }
}

fn check_unique(items: &[LogicalItem]) -> Result<(), BinderError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(BinderError::DuplicateItem(item.id.clone()));
        }
    }
    Ok(())
}

impl ListBinderApi for ListBinderService {
    fn bind(&self, items: Vec<LogicalItem>) -> Result<(), BinderError> {
        check_unique(&items)?;
        let capacity = self.capacity();
        if self.config.mode == BindingMode::Static && items.len() > capacity {
            warn!(
                owner = %self.config.owner,
                requested = items.len(),
                capacity,
                "[tl-02] List does not fit the pool"
            );
            return Err(BinderError::CapacityExceeded {
                requested: items.len(),
                capacity,
            });
        }

        let mut state = self.state.lock();
        state.items = items;
        let signals = self.assign(&mut state);
        self.port.send_all(signals)?;

        debug!(
            owner = %self.config.owner,
            items = state.items.len(),
            bound = state.bound_count(),
            "[tl-02] List bound"
        );
        Ok(())
    }

    fn on_slot_press(&self, slot: usize, pressed: bool) -> Result<bool, BinderError> {
        let capacity = self.capacity();
        if slot == 0 || slot > capacity {
            return Err(BinderError::InvalidSlot { slot, capacity });
        }

        let activation = {
            let mut state = self.state.lock();
            let record = &mut state.slots[slot - 1];
            if pressed {
                record.pressed_by = if record.enabled {
                    record.item.clone()
                } else {
                    None
                };
                None
            } else {
                match record.pressed_by.take() {
                    Some(id) if record.is_bound_to(&id) => Some((id, record.callback.clone())),
                    Some(id) => {
                        debug!(slot, item = %id, "[tl-02] Stale release ignored");
                        None
                    }
                    None => None,
                }
            }
        };

        // Lock released: the callback may re-enter the binder.
        match activation {
            Some((id, Some(callback))) => {
                debug!(slot, item = %id, "[tl-02] Item activated");
                callback(&id);
                Ok(true)
            }
            Some((id, None)) => {
                debug!(slot, item = %id, "[tl-02] Item has no callback");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn set_item_attribute(&self, id: &str, attribute: ItemAttribute) -> Result<(), BinderError> {
        let mut state = self.state.lock();
        self.apply_attribute(&mut state, id, attribute)
    }

    fn toggle_selected(&self, id: &str) -> Result<bool, BinderError> {
        let mut state = self.state.lock();
        let selected = !state
            .items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| BinderError::UnknownItem(id.to_string()))?
            .selected;
        self.apply_attribute(&mut state, id, ItemAttribute::Selected(selected))?;
        Ok(selected)
    }

    fn set_window_start(&self, start: usize) -> Result<(), BinderError> {
        let mut state = self.state.lock();
        state.window_start = start;
        if self.config.mode == BindingMode::Static {
            debug!(start, "[tl-02] Window start has no effect in static mode");
            return Ok(());
        }
        let signals = self.assign_windowed(&mut state);
        self.port.send_all(signals)?;
        Ok(())
    }

    fn refresh(&self) -> Result<(), BinderError> {
        let state = self.state.lock();
        let mut signals = Vec::new();
        for (index, record) in state.slots.iter().enumerate() {
            let item = record
                .item
                .as_deref()
                .and_then(|id| state.items.iter().find(|i| i.id == id));
            match item {
                Some(item) => signals.extend(self.item_signals(index + 1, item)),
                None => signals.extend(self.cleared_signals(index + 1)),
            }
        }
        signals.extend(self.count_signal(state.bound_count()));
        self.port.send_all(signals)?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.config.layout.slot_count
    }

    fn bound_slot(&self, id: &str) -> Option<usize> {
        self.state
            .lock()
            .slots
            .iter()
            .position(|r| r.is_bound_to(id))
            .map(|index| index + 1)
    }

    fn item_at(&self, slot: usize) -> Option<ItemId> {
        let state = self.state.lock();
        state.slots.get(slot.checked_sub(1)?)?.item.clone()
    }
}

impl SignalHandler for ListBinderService {
    fn on_signal(&self, signal: &Signal) {
        let Some(pressed) = signal.value.as_bool() else {
            return;
        };
        let Some(slot) = self.config.layout.slot_for_press(signal.address) else {
            return;
        };
        if let Err(e) = self.on_slot_press(slot, pressed) {
            warn!(address = signal.address, error = %e, "[tl-02] Press not handled");
        }
    }
}
