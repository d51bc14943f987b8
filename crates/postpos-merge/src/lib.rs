//! Positioned list merger for Post Position.
//!
//! Splices pinned items into an ordered listing at their requested 1-based
//! slot, optionally plucking each pinned item's natural occurrence out of the
//! listing first.
//!
//! # Quick Start
//!
//! ```rust
//! use postpos_merge::{merge, MergeConfig};
//! use postpos_types::{ItemId, PinnedItem};
//!
//! let base: Vec<ItemId> = [1, 2, 3].into_iter().map(ItemId::new).collect();
//! let pins = vec![PinnedItem::new(ItemId::new(2), 1)];
//! let merged = merge(base, pins, MergeConfig::default());
//! assert_eq!(merged, [2, 1, 3].map(ItemId::new));
//! ```

pub mod merger;

pub use merger::{merge, merge_in_place, MergeConfig, MergeSummary, PositionedListMerger};
