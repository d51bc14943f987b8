//! Position metadata for Post Position.
//!
//! Every content item may carry one integer metadata field (by default
//! `frontpage-post-position`) naming the slot it should be pinned to. This
//! crate stores that field and answers the query "which items are pinned,
//! and where".
//!
//! # Modules
//!
//! - [`error`] - Error types for metadata operations
//! - [`traits`] - [`MetadataStore`] and [`PinnedItemSource`] interfaces
//! - [`memory`] - In-memory [`InMemoryMetaStore`]
//! - [`file`] - JSON-file backed [`FileMetaStore`]
//! - [`catalog`] - [`InMemoryCatalog`] of host content and [`StoredPins`]

pub mod catalog;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use catalog::{InMemoryCatalog, StoredPins};
pub use error::{MetaError, Result};
pub use file::FileMetaStore;
pub use memory::InMemoryMetaStore;
pub use traits::{MetadataStore, PinQuery, PinnedItemSource, PositionTable};
