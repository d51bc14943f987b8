//! High-level API for Post Position.
//!
//! [`PostPosition`] ties the pieces together: it saves positions submitted
//! through the edit form, reports stored positions back, and reorders the
//! listing of qualifying requests. Behaviour is driven by one explicit
//! [`PluginConfig`] built at startup.

pub mod config;
pub mod error;
pub mod plugin;

pub use config::PluginConfig;
pub use error::{ConfigError, SdkError, SdkResult};
pub use plugin::{PostPosition, SaveOutcome, SkipReason, DEFAULT_HOST_PAGE_SIZE};

// Re-export key types
pub use postpos_gate::{ConditionRegistry, RequestContext};
pub use postpos_merge::{MergeConfig, MergeSummary};
pub use postpos_meta::{FileMetaStore, InMemoryCatalog, InMemoryMetaStore, MetadataStore};
pub use postpos_types::{ContentItem, ItemId, PinnedItem, Position};
