//! # Core Domain Entities
//!
//! Defines the values exchanged over the panel bus.
//!
//! ## Clusters
//!
//! - **Signals**: `Signal`, `SignalValue`, `SignalKind`, `Address`
//! - **Addressing**: `JoinRange`
//! - **Access**: `AuthorizationLevel`

use crate::errors::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: SIGNALS
// =============================================================================

/// Numeric identifier of a signal ("join") on the panel.
pub type Address = u32;

/// Discriminant of a `SignalValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Digital join (buttons, visibility, feedback).
    Bool,
    /// Analog join (levels, counts, icons).
    Numeric,
    /// Serial join (labels).
    Text,
}

/// A typed signal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalValue {
    /// Digital level.
    Bool(bool),
    /// Analog value.
    Numeric(u16),
    /// Serial string.
    Text(String),
}

impl SignalValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Bool(_) => SignalKind::Bool,
            Self::Numeric(_) => SignalKind::Numeric,
            Self::Text(_) => SignalKind::Text,
        }
    }

    /// Value a freshly cleared join of `kind` holds.
    #[must_use]
    pub fn default_for(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Bool => Self::Bool(false),
            SignalKind::Numeric => Self::Numeric(0),
            SignalKind::Text => Self::Text(String::new()),
        }
    }

    /// Digital level, if this is a digital value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Analog value, if this is an analog value.
    #[must_use]
    pub fn as_numeric(&self) -> Option<u16> {
        match self {
            Self::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Serial string, if this is a serial value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SignalValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u16> for SignalValue {
    fn from(value: u16) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SignalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An addressed, typed value travelling in either direction over the bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    /// Join number.
    pub address: Address,
    /// Typed payload.
    pub value: SignalValue,
}

impl Signal {
    /// Create a new signal.
    #[must_use]
    pub fn new(address: Address, value: impl Into<SignalValue>) -> Self {
        Self {
            address,
            value: value.into(),
        }
    }

    /// The kind of the carried value.
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        self.value.kind()
    }

    /// Digital high on this join.
    #[must_use]
    pub fn is_press(&self) -> bool {
        matches!(self.value, SignalValue::Bool(true))
    }

    /// Digital low on this join.
    #[must_use]
    pub fn is_release(&self) -> bool {
        matches!(self.value, SignalValue::Bool(false))
    }
}

// =============================================================================
// CLUSTER B: ADDRESSING
// =============================================================================

/// An inclusive range of join numbers.
///
/// Ranges are kind-agnostic: owning join 1100 means owning digital, analog
/// and serial join 1100 alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinRange {
    start: Address,
    end: Address,
}

impl JoinRange {
    /// Create a range covering `start..=end`.
    pub fn new(start: Address, end: Address) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a range of `len` joins beginning at `start`.
    pub fn with_len(start: Address, len: u32) -> Result<Self, RangeError> {
        if len == 0 {
            return Err(RangeError::Empty);
        }
        let end = start
            .checked_add(len - 1)
            .ok_or(RangeError::Overflow { start, len })?;
        Ok(Self { start, end })
    }

    /// Range containing exactly one join.
    #[must_use]
    pub fn single(address: Address) -> Self {
        Self {
            start: address,
            end: address,
        }
    }

    /// First join.
    #[must_use]
    pub fn start(&self) -> Address {
        self.start
    }

    /// Last join.
    #[must_use]
    pub fn end(&self) -> Address {
        self.end
    }

    /// Number of joins covered.
    #[must_use]
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    /// A `JoinRange` always covers at least one join.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when `address` lies inside the range.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        (self.start..=self.end).contains(&address)
    }

    /// True when the ranges share at least one join.
    #[must_use]
    pub fn overlaps(&self, other: &JoinRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for JoinRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.start, self.end)
    }
}

// =============================================================================
// CLUSTER C: ACCESS
// =============================================================================

/// Ordered access tier granted by a successful PIN lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum AuthorizationLevel {
    /// Unauthenticated.
    #[default]
    None,
    /// Operator.
    Level1,
    /// Supervisor.
    Level2,
    /// Technician.
    Level3,
}

impl AuthorizationLevel {
    /// True for every level above `None`.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        *self > Self::None
    }

    /// True when this level satisfies `required`.
    #[must_use]
    pub fn permits(&self, required: AuthorizationLevel) -> bool {
        *self >= required
    }
}

impl fmt::Display for AuthorizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Level1 => "Level1",
            Self::Level2 => "Level2",
            Self::Level3 => "Level3",
        };
        f.write_str(name)
    }
}
