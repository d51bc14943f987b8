//! Interfaces for position storage and pinned item lookup.

use std::collections::BTreeMap;

use postpos_types::{ItemId, PinnedItem, Position};
use serde::{Deserialize, Serialize};

use crate::error::{MetaError, Result};

/// Stored positions: field name -> item -> position.
pub type PositionTable = BTreeMap<String, BTreeMap<ItemId, Position>>;

/// Storage backend for the per-item position field.
///
/// Implementations must be thread-safe (`Send + Sync`). A field that was
/// never written reads as [`Position::UNSET`].
pub trait MetadataStore: Send + Sync {
    /// Read the stored position of `item` under `field`.
    fn get_position(&self, item: ItemId, field: &str) -> Result<Position>;

    /// Store a position for `item` under `field`, replacing any previous value.
    fn set_position(&self, item: ItemId, field: &str, position: Position) -> Result<()>;

    /// Remove the stored value.
    ///
    /// Returns `Ok(true)` if a value existed.
    fn clear_position(&self, item: ItemId, field: &str) -> Result<bool>;

    /// All stored values under `field`, sorted by item id.
    fn positions(&self, field: &str) -> Result<Vec<(ItemId, Position)>>;

    /// Items whose stored position under `field` is at least `min`.
    fn pinned_ids(&self, field: &str, min: Position) -> Result<Vec<(ItemId, Position)>> {
        Ok(self
            .positions(field)?
            .into_iter()
            .filter(|(_, p)| *p >= min)
            .collect())
    }
}

/// Parameters of a pinned item lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinQuery {
    /// Metadata field holding the position.
    pub field_name: String,
    /// Smallest stored position that counts as pinned.
    pub min_position: Position,
    /// Maximum number of items returned. `None` means unbounded.
    pub limit: Option<usize>,
    /// Content types to consider. Empty means any type.
    pub content_types: Vec<String>,
}

impl PinQuery {
    /// A query for `field_name` with `min_position = 1` and no limit.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            min_position: Position::new(1),
            limit: None,
            content_types: Vec::new(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if items of `content_type` are considered.
    pub fn accepts_type(&self, content_type: &str) -> bool {
        self.content_types.is_empty() || self.content_types.iter().any(|t| t == content_type)
    }
}

/// Supplies the pinned items for a request.
///
/// Items come back in the host's own ordering, each carrying its stored
/// position, capped at the query's limit.
pub trait PinnedItemSource {
    fn pinned_items(&self, query: &PinQuery) -> Result<Vec<PinnedItem>>;
}

/// Reject empty field names before they reach a store.
pub(crate) fn validate_field(field: &str) -> Result<()> {
    if field.trim().is_empty() {
        return Err(MetaError::InvalidFieldName(field.to_string()));
    }
    Ok(())
}
