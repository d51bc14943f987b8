//! The host's content, in its default display order.

use postpos_types::{ContentItem, ItemId, PinnedItem};
use serde::{Deserialize, Serialize};

use crate::error::{MetaError, Result};
use crate::traits::{MetadataStore, PinQuery, PinnedItemSource};

/// All known content items in the host's default ordering.
///
/// Stands in for the host's content query: it yields the base listing of a
/// page and, combined with a [`MetadataStore`], the pinned items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryCatalog {
    items: Vec<ContentItem>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from items already in display order.
    pub fn from_items(items: Vec<ContentItem>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.push(item)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of content items.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<ContentItem> =
            serde_json::from_str(json).map_err(|e| MetaError::Serialization(e.to_string()))?;
        Self::from_items(items)
    }

    /// Append an item at the end of the display order.
    pub fn push(&mut self, item: ContentItem) -> Result<()> {
        if self.get(item.id).is_some() {
            return Err(MetaError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }

    /// The first `limit` items of the accepted types, in display order.
    ///
    /// An empty `content_types` accepts every type.
    pub fn listing(&self, content_types: &[String], limit: Option<usize>) -> Vec<ContentItem> {
        self.items
            .iter()
            .filter(|item| {
                content_types.is_empty() || content_types.iter().any(|t| *t == item.content_type)
            })
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Pair this catalog with a position store.
    pub fn with_store<'a, S>(&'a self, store: &'a S) -> StoredPins<'a, S>
    where
        S: MetadataStore + ?Sized,
    {
        StoredPins {
            catalog: self,
            store,
        }
    }
}

/// A [`PinnedItemSource`] reading positions from a [`MetadataStore`] and
/// items from an [`InMemoryCatalog`].
pub struct StoredPins<'a, S: ?Sized> {
    catalog: &'a InMemoryCatalog,
    store: &'a S,
}

impl<S> PinnedItemSource for StoredPins<'_, S>
where
    S: MetadataStore + ?Sized,
{
    fn pinned_items(&self, query: &PinQuery) -> Result<Vec<PinnedItem>> {
        let mut pinned = Vec::new();
        for item in self.catalog.iter() {
            if query.limit.is_some_and(|limit| pinned.len() >= limit) {
                break;
            }
            if !query.accepts_type(&item.content_type) {
                continue;
            }
            let position = self.store.get_position(item.id, &query.field_name)?;
            if !position.is_pinned() || position < query.min_position {
                continue;
            }
            pinned.push(PinnedItem::at(item.clone(), position));
        }
        Ok(pinned)
    }
}
