use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Stable identifier of a content item.
///
/// Identifiers are assigned by the host and never reused. They are the only
/// thing the merger looks at when deciding whether two items are the same.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw host identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host identifier.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ItemId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidItemId(s.to_string()))
    }
}

/// Anything that carries a comparable identifier.
///
/// The list merger is generic over this trait so hosts can splice their own
/// item representations without converting to [`ContentItem`] first.
pub trait Identified {
    /// The identifier type used for duplicate detection.
    type Id: PartialEq;

    /// The identifier of this item.
    fn id(&self) -> &Self::Id;
}

/// A unit of content (e.g. a post) as handed over by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Host identifier.
    pub id: ItemId,
    /// Content type name, e.g. `"post"` or `"page"`.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Any further payload the host attaches. Opaque to this crate.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

fn default_content_type() -> String {
    "post".into()
}

impl ContentItem {
    /// A bare item of type `post` with no title.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            content_type: default_content_type(),
            title: String::new(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Identified for ContentItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Identified for ItemId {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        self
    }
}
