//! In-memory position store for testing and ephemeral use.
//!
//! [`InMemoryMetaStore`] keeps a [`PositionTable`] behind a `RwLock`. Data is
//! lost when the store is dropped.

use std::sync::RwLock;

use postpos_types::{ItemId, Position};

use crate::error::{MetaError, Result};
use crate::traits::{validate_field, MetadataStore, PositionTable};

/// An in-memory implementation of [`MetadataStore`].
#[derive(Debug, Default)]
pub struct InMemoryMetaStore {
    table: RwLock<PositionTable>,
}

impl InMemoryMetaStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `table`.
    pub fn from_table(table: PositionTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// A copy of everything stored.
    pub fn snapshot(&self) -> Result<PositionTable> {
        let table = self.table.read().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        Ok(table.clone())
    }
}

impl MetadataStore for InMemoryMetaStore {
    fn get_position(&self, item: ItemId, field: &str) -> Result<Position> {
        let table = self.table.read().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        Ok(table
            .get(field)
            .and_then(|values| values.get(&item))
            .copied()
            .unwrap_or(Position::UNSET))
    }

    fn set_position(&self, item: ItemId, field: &str, position: Position) -> Result<()> {
        validate_field(field)?;
        let mut table = self.table.write().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        table.entry(field.to_string()).or_default().insert(item, position);
        Ok(())
    }

    fn clear_position(&self, item: ItemId, field: &str) -> Result<bool> {
        let mut table = self.table.write().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        let Some(values) = table.get_mut(field) else {
            return Ok(false);
        };
        let removed = values.remove(&item).is_some();
        if values.is_empty() {
            table.remove(field);
        }
        Ok(removed)
    }

    fn positions(&self, field: &str) -> Result<Vec<(ItemId, Position)>> {
        let table = self.table.read().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        Ok(table
            .get(field)
            .map(|values| values.iter().map(|(id, p)| (*id, *p)).collect())
            .unwrap_or_default())
    }
}
