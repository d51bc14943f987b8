//! JSON-file backed position store.
//!
//! The whole [`PositionTable`] is kept in memory and written back to disk
//! after every mutation. Suited to the command line and small sites, not to
//! concurrent writers in separate processes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use postpos_types::{ItemId, Position};
use tracing::{debug, info};

use crate::error::{MetaError, Result};
use crate::traits::{validate_field, MetadataStore, PositionTable};

/// A [`MetadataStore`] persisted as a JSON document.
#[derive(Debug)]
pub struct FileMetaStore {
    path: PathBuf,
    table: RwLock<PositionTable>,
}

impl FileMetaStore {
    /// Open the store at `path`. A missing file yields an empty store; the
    /// file is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            let data = fs::read(&path)?;
            if data.iter().all(u8::is_ascii_whitespace) {
                PositionTable::new()
            } else {
                serde_json::from_slice(&data)
                    .map_err(|e| MetaError::Serialization(e.to_string()))?
            }
        } else {
            debug!(path = %path.display(), "metadata file not found; starting empty");
            PositionTable::new()
        };
        info!(path = %path.display(), fields = table.len(), "metadata store opened");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &PositionTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(table)
            .map_err(|e| MetaError::Serialization(e.to_string()))?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), "metadata store written");
        Ok(())
    }
}

impl MetadataStore for FileMetaStore {
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
        let mut next = table.clone();
        next.entry(field.to_string()).or_default().insert(item, position);
        self.persist(&next)?;
        *table = next;
        Ok(())
    }

    fn clear_position(&self, item: ItemId, field: &str) -> Result<bool> {
        let mut table = self.table.write().map_err(|e| {
            MetaError::LockPoisoned(e.to_string())
        })?;
        if !table.get(field).is_some_and(|values| values.contains_key(&item)) {
            return Ok(false);
        }
        // The table only changes once the file reflects it.
        let mut next = table.clone();
        if let Some(values) = next.get_mut(field) {
            values.remove(&item);
            if values.is_empty() {
                next.remove(field);
            }
        }
        self.persist(&next)?;
        *table = next;
        Ok(true)
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
