use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::item::{ContentItem, Identified, ItemId};

/// A stored position value.
///
/// Positions are persisted as non-negative integers. `0` is the "unset"
/// value: an item whose position is zero is never pinned.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    /// The unset position.
    pub const UNSET: Position = Position(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this position requests a slot (`>= 1`).
    pub const fn is_pinned(&self) -> bool {
        self.0 >= 1
    }

    /// The position as a signed slot number, saturating at `i64::MAX`.
    pub fn as_slot(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Position {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// An item paired with the 1-based slot it should occupy.
///
/// `position` is signed on purpose: hosts may hand over zero or negative
/// values, which the merger treats as "do not insert".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinnedItem<T = ContentItem> {
    pub item: T,
    pub position: i64,
}

impl<T> PinnedItem<T> {
    pub fn new(item: T, position: i64) -> Self {
        Self { item, position }
    }

    /// Pin an item at a stored [`Position`].
    pub fn at(item: T, position: Position) -> Self {
        Self::new(item, position.as_slot())
    }

    /// The zero-based insertion index, or `None` if the pin is inert.
    pub fn index(&self) -> Option<usize> {
        if self.position < 1 {
            return None;
        }
        Some(usize::try_from(self.position - 1).unwrap_or(usize::MAX))
    }

    /// Swap the pinned payload while keeping the position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PinnedItem<U> {
        PinnedItem {
            item: f(self.item),
            position: self.position,
        }
    }
}

impl<T: Identified> Identified for PinnedItem<T> {
    type Id = T::Id;

    fn id(&self) -> &T::Id {
        self.item.id()
    }
}

/// Parse an `id:position` pair such as `"17:2"`.
///
/// Used by command-line front ends that pin bare identifiers.
pub fn parse_pin_spec(spec: &str) -> Result<PinnedItem<ItemId>, TypeError> {
    let (id, position) = spec.split_once(':').ok_or_else(|| TypeError::InvalidPinSpec {
        spec: spec.to_string(),
        reason: "expected <id>:<position>".into(),
    })?;
    let id: ItemId = id.parse()?;
    let position = position
        .trim()
        .parse::<i64>()
        .map_err(|e| TypeError::InvalidPinSpec {
            spec: spec.to_string(),
            reason: e.to_string(),
        })?;
    Ok(PinnedItem::new(id, position))
}
