//! # Domain Entities
//!
//! Logical items and the per-slot records the binder keeps for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Application-level item identifier.
pub type ItemId = String;

/// Activation callback, called with the id of the activated item.
pub type ItemCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// One application-level list entry.
#[derive(Clone)]
pub struct LogicalItem {
    /// Identifier, unique within one list.
    pub id: ItemId,
    /// Label pushed to the slot's text join.
    pub text: String,
    /// Value pushed to the slot's numeric join.
    pub value: u16,
    /// Enable flag.
    pub enabled: bool,
    /// Visible flag.
    pub visible: bool,
    /// Selected flag.
    pub selected: bool,
    /// Run on press-release of the slot showing this item.
    pub on_activate: Option<ItemCallback>,
}

impl LogicalItem {
    /// Enabled, visible, unselected item with no callback.
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            value: 0,
            enabled: true,
            visible: true,
            selected: false,
            on_activate: None,
        }
    }

    /// Set the numeric value.
    #[must_use]
    pub fn with_value(mut self, value: u16) -> Self {
        self.value = value;
        self
    }

    /// Set the activation callback.
    #[must_use]
    pub fn with_callback(mut self, callback: ItemCallback) -> Self {
        self.on_activate = Some(callback);
        self
    }

    /// Apply one attribute change.
    pub fn apply(&mut self, attribute: &ItemAttribute) {
        match attribute {
            ItemAttribute::Text(text) => self.text.clone_from(text),
            ItemAttribute::Value(value) => self.value = *value,
            ItemAttribute::Enabled(on) => self.enabled = *on,
            ItemAttribute::Visible(on) => self.visible = *on,
            ItemAttribute::Selected(on) => self.selected = *on,
        }
    }
}

impl fmt::Debug for LogicalItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalItem")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("value", &self.value)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("selected", &self.selected)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

/// A single display attribute of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemAttribute {
    /// Label text.
    Text(String),
    /// Numeric value.
    Value(u16),
    /// Enable flag.
    Enabled(bool),
    /// Visible flag.
    Visible(bool),
    /// Selected flag.
    Selected(bool),
}

/// How a list maps onto the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BindingMode {
    /// Item `i` on slot `i`; lists longer than the pool are rejected.
    #[default]
    Static,
    /// A window of the list is bound with sticky slot assignment.
    Windowed,
}

/// What a slot currently shows, captured at bind time.
#[derive(Clone, Default)]
pub(crate) struct SlotRecord {
    pub(crate) item: Option<ItemId>,
    pub(crate) callback: Option<ItemCallback>,
    pub(crate) enabled: bool,
    /// Item bound when the current press began.
    pub(crate) pressed_by: Option<ItemId>,
}

impl SlotRecord {
    pub(crate) fn bound(item: &LogicalItem) -> Self {
        Self {
            item: Some(item.id.clone()),
            callback: item.on_activate.clone(),
            enabled: item.enabled,
            pressed_by: None,
        }
    }

    /// Rebind to `item`, keeping an in-flight press only for the same item.
    pub(crate) fn rebind(&mut self, item: &LogicalItem) {
        let pressed_by = self.pressed_by.take().filter(|id| *id == item.id);
        *self = Self::bound(item);
        self.pressed_by = pressed_by;
    }

    pub(crate) fn is_bound_to(&self, id: &str) -> bool {
        self.item.as_deref() == Some(id)
    }
}
