use serde::{Deserialize, Serialize};
use tracing::trace;

use postpos_types::{Identified, PinnedItem};

// ---------------------------------------------------------------------------
// MergeConfig
// ---------------------------------------------------------------------------

/// Options controlling how pinned items are spliced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Remove every occurrence of a pinned item from the listing before
    /// inserting it at its slot.
    pub avoid_doubles: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { avoid_doubles: true }
    }
}

impl MergeConfig {
    /// Keep natural occurrences; a pinned item may then appear twice.
    pub fn allow_doubles() -> Self {
        Self {
            avoid_doubles: false,
        }
    }
}

// ---------------------------------------------------------------------------
// MergeSummary
// ---------------------------------------------------------------------------

/// Counters describing what a merge did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Pins that were inserted.
    pub inserted: usize,
    /// Pins ignored because their position was below 1.
    pub skipped: usize,
    /// Natural occurrences removed because `avoid_doubles` was set.
    pub removed_duplicates: usize,
    /// Insertions whose slot lay past the end and were appended instead.
    pub clamped: usize,
}

impl MergeSummary {
    /// Returns `true` if the listing was left untouched.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.removed_duplicates == 0
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Splice `pins` into `list` in place.
///
/// Pins are applied one after another and each slot is resolved against the
/// list as it stands after the previous pins, so two pins at position 1 end
/// up in reverse order. Slots past the end append. Positions below 1 are
/// ignored.
pub fn merge_in_place<T, I>(list: &mut Vec<T>, pins: I, config: MergeConfig) -> MergeSummary
where
    T: Identified,
    I: IntoIterator<Item = PinnedItem<T>>,
{
    let mut summary = MergeSummary::default();

    for pin in pins {
        let Some(index) = pin.index() else {
            trace!(position = pin.position, "skipping pin below first slot");
            summary.skipped += 1;
            continue;
        };

        if config.avoid_doubles {
            let before = list.len();
            list.retain(|existing| existing.id() != pin.item.id());
            summary.removed_duplicates += before - list.len();
        }

        let at = if index > list.len() {
            summary.clamped += 1;
            list.len()
        } else {
            index
        };
        trace!(position = pin.position, at, "inserting pinned item");
        list.insert(at, pin.item);
        summary.inserted += 1;
    }

    summary
}

/// Splice `pins` into `base` and return the resulting listing.
///
/// Pure: `base` is consumed and a new ordering is returned. See
/// [`merge_in_place`] for the exact semantics.
pub fn merge<T, I>(mut base: Vec<T>, pins: I, config: MergeConfig) -> Vec<T>
where
    T: Identified,
    I: IntoIterator<Item = PinnedItem<T>>,
{
    merge_in_place(&mut base, pins, config);
    base
}

/// A merger bound to a fixed [`MergeConfig`].
///
/// Stateless apart from its configuration; one instance can serve every
/// request.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionedListMerger {
    config: MergeConfig,
}

impl PositionedListMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MergeConfig {
        self.config
    }

    /// Merge and return the new listing.
    pub fn merge<T, I>(&self, base: Vec<T>, pins: I) -> Vec<T>
    where
        T: Identified,
        I: IntoIterator<Item = PinnedItem<T>>,
    {
        merge(base, pins, self.config)
    }

    /// Merge and also report what happened.
    pub fn merge_with_summary<T, I>(&self, mut base: Vec<T>, pins: I) -> (Vec<T>, MergeSummary)
    where
        T: Identified,
        I: IntoIterator<Item = PinnedItem<T>>,
    {
        let summary = merge_in_place(&mut base, pins, self.config);
        (base, summary)
    }
}
