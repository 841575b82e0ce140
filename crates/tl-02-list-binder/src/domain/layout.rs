//! # Slot Layout
//!
//! Address arithmetic for a pool of `slot_count` identical slots.
//!
//! ```text
//! bool    join = base + (slot - 1) * bool_increment    + offset
//! numeric join = base + (slot - 1) * numeric_increment + value_offset
//! text    join = base + (slot - 1) * text_increment    + text_offset
//! ```
//!
//! Join numbering is per kind on the panel, so a bool join and a numeric
//! join of the same slot may share an address.

use super::errors::BinderError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, JoinRange};

/// Per-kind slot strides and per-signal offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLayout {
    /// First join of slot 1.
    pub base: Address,
    /// Number of slots in the pool.
    pub slot_count: usize,
    /// Bool joins per slot.
    pub bool_increment: u32,
    /// Numeric joins per slot.
    pub numeric_increment: u32,
    /// Text joins per slot.
    pub text_increment: u32,
    /// Enable (bool) offset.
    pub enable_offset: u32,
    /// Visible (bool) offset.
    pub visible_offset: u32,
    /// Selected (bool) offset.
    pub selected_offset: u32,
    /// Press (bool, inbound) offset.
    pub press_offset: u32,
    /// Value (numeric) offset.
    pub value_offset: u32,
    /// Text offset.
    pub text_offset: u32,
    /// Optional numeric join carrying the number of items shown.
    pub count_address: Option<Address>,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            base: 4001,
            slot_count: 10,
            bool_increment: 5,
            numeric_increment: 3,
            text_increment: 2,
            enable_offset: 0,
            visible_offset: 1,
            selected_offset: 2,
            press_offset: 3,
            value_offset: 0,
            text_offset: 0,
            count_address: Some(4000),
        }
    }
}

impl SlotLayout {
    /// Check that no two signals of one kind collide.
    pub fn validate(&self) -> Result<(), BinderError> {
        if self.slot_count == 0 {
            return Err(BinderError::InvalidLayout("slot_count is zero".into()));
        }
        let bool_offsets = [
            self.enable_offset,
            self.visible_offset,
            self.selected_offset,
            self.press_offset,
        ];
        for (i, a) in bool_offsets.iter().enumerate() {
            if *a >= self.bool_increment {
                return Err(BinderError::InvalidLayout(format!(
                    "bool offset {a} does not fit increment {}",
                    self.bool_increment
                )));
            }
            if bool_offsets[i + 1..].contains(a) {
                return Err(BinderError::InvalidLayout(format!(
                    "bool offset {a} used twice"
                )));
            }
        }
        if self.value_offset >= self.numeric_increment {
            return Err(BinderError::InvalidLayout(
                "value offset does not fit numeric increment".into(),
            ));
        }
        if self.text_offset >= self.text_increment {
            return Err(BinderError::InvalidLayout(
                "text offset does not fit text increment".into(),
            ));
        }
        self.block_range()?;
        if let Some(count) = self.count_address {
            let collides = (1..=self.slot_count).any(|slot| self.value(slot) == count);
            if collides {
                return Err(BinderError::InvalidLayout(format!(
                    "count join {count} collides with slot values"
                )));
            }
        }
        Ok(())
    }

    /// Joins occupied by the slot pool, without the count join.
    fn block_range(&self) -> Result<JoinRange, BinderError> {
        let widest = self
            .bool_increment
            .max(self.numeric_increment)
            .max(self.text_increment);
        let span = (self.slot_count as u64) * u64::from(widest);
        let span = u32::try_from(span)
            .map_err(|_| BinderError::InvalidLayout("pool span overflows".into()))?;
        JoinRange::with_len(self.base, span)
            .map_err(|e| BinderError::InvalidLayout(e.to_string()))
    }

    /// Joins the binder must own: the pool plus the count join.
    pub fn range(&self) -> Result<JoinRange, BinderError> {
        let block = self.block_range()?;
        let (start, end) = match self.count_address {
            Some(count) => (block.start().min(count), block.end().max(count)),
            None => (block.start(), block.end()),
        };
        JoinRange::new(start, end).map_err(|e| BinderError::InvalidLayout(e.to_string()))
    }

    /// Join at `offset` within `slot`'s stride of `increment` joins.
    ///
    /// Slots are 1-based and must lie within `1..=slot_count`.
    fn slot_join(&self, slot: usize, increment: u32, offset: u32) -> Address {
        debug_assert!(
            (1..=self.slot_count).contains(&slot),
            "slot {slot} outside 1..={}",
            self.slot_count
        );
        let index = u32::try_from(slot.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base
            .saturating_add(index.saturating_mul(increment))
            .saturating_add(offset)
    }

    /// Enable join of `slot` (1-based).
    pub fn enable(&self, slot: usize) -> Address {
        self.slot_join(slot, self.bool_increment, self.enable_offset)
    }

    /// Visible join of `slot` (1-based).
    pub fn visible(&self, slot: usize) -> Address {
        self.slot_join(slot, self.bool_increment, self.visible_offset)
    }

    /// Selected join of `slot` (1-based).
    pub fn selected(&self, slot: usize) -> Address {
        self.slot_join(slot, self.bool_increment, self.selected_offset)
    }

    /// Press join of `slot` (1-based).
    pub fn press(&self, slot: usize) -> Address {
        self.slot_join(slot, self.bool_increment, self.press_offset)
    }

    /// Value join of `slot` (1-based).
    pub fn value(&self, slot: usize) -> Address {
        self.slot_join(slot, self.numeric_increment, self.value_offset)
    }

    /// Text join of `slot` (1-based).
    pub fn text(&self, slot: usize) -> Address {
        self.slot_join(slot, self.text_increment, self.text_offset)
    }

    /// Slot whose press join is `address`, if any.
    pub fn slot_for_press(&self, address: Address) -> Option<usize> {
        let rel = address.checked_sub(self.base)?;
        if rel % self.bool_increment != self.press_offset {
            return None;
        }
        let slot = (rel / self.bool_increment) as usize + 1;
        (slot <= self.slot_count).then_some(slot)
    }

    /// Range covering every press join, for handler registration.
    pub fn press_range(&self) -> Result<JoinRange, BinderError> {
        JoinRange::new(self.press(1), self.press(self.slot_count))
            .map_err(|e| BinderError::InvalidLayout(e.to_string()))
    }
}
