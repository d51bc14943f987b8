use std::collections::HashMap;

use postpos_gate::{ConditionGate, ConditionRegistry, GateOutcome, RequestContext};
use postpos_merge::PositionedListMerger;
use postpos_meta::{InMemoryCatalog, MetadataStore, PinnedItemSource};
use postpos_types::{parse_position, ContentItem, ItemId, PinnedItem, Position};
use tracing::{debug, warn};

use crate::config::PluginConfig;
use crate::error::{SdkError, SdkResult};

/// Page size assumed for the host when none is given.
pub const DEFAULT_HOST_PAGE_SIZE: usize = 10;

/// What happened to an edit-form submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The value was stored.
    Stored(Position),
    /// Nothing was written.
    Skipped(SkipReason),
}

/// Why a submission left the stored position untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The item's content type does not carry a position.
    UnsupportedContentType,
    /// The position field was absent or blank.
    NoValue,
    /// The position field was not an integer.
    NotANumber,
}

/// High-level Post Position API.
///
/// Owns the configuration, the condition gate, the merger, and the position
/// store. One instance serves every request; each call works on its own
/// listing.
pub struct PostPosition<S> {
    config: PluginConfig,
    gate: ConditionGate,
    merger: PositionedListMerger,
    store: S,
    host_page_size: usize,
}

impl<S: MetadataStore> PostPosition<S> {
    /// Build with the built-in request conditions.
    pub fn new(config: PluginConfig, store: S) -> SdkResult<Self> {
        Self::with_registry(config, ConditionRegistry::with_builtins(), store)
    }

    /// Build with a caller-supplied condition registry.
    pub fn with_registry(
        config: PluginConfig,
        registry: ConditionRegistry,
        store: S,
    ) -> SdkResult<Self> {
        config.validate()?;
        let gate = ConditionGate::new(registry, config.gate_config());
        let merger = PositionedListMerger::new(config.merge_config());
        Ok(Self {
            config,
            gate,
            merger,
            store,
            host_page_size: DEFAULT_HOST_PAGE_SIZE,
        })
    }

    /// Set the host's configured page size, used when the plugin config
    /// leaves `page_size` unset.
    pub fn with_host_page_size(mut self, host_page_size: usize) -> Self {
        self.host_page_size = host_page_size.max(1);
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register additional request conditions.
    pub fn registry_mut(&mut self) -> &mut ConditionRegistry {
        self.gate.registry_mut()
    }

    /// Page size in effect for listings and pinned item lookups.
    pub fn page_size(&self) -> usize {
        self.config.effective_page_size(self.host_page_size)
    }

    // ---- Edit form ----

    /// Persist the position submitted with an item's edit form.
    ///
    /// `form` holds the submitted fields. Absent, blank, or non-numeric
    /// values are skipped without touching the stored position; negative
    /// numbers are stored as their magnitude.
    pub fn save_submission(
        &self,
        item: &ContentItem,
        form: &HashMap<String, String>,
    ) -> SdkResult<SaveOutcome> {
        if !self.config.supports(&item.content_type) {
            return Ok(SaveOutcome::Skipped(SkipReason::UnsupportedContentType));
        }
        let raw = match form.get(&self.config.meta_field_name) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(SaveOutcome::Skipped(SkipReason::NoValue)),
        };
        let Some(position) = parse_position(Some(raw)) else {
            debug!(item = %item.id, value = %raw, "ignoring non-numeric position");
            return Ok(SaveOutcome::Skipped(SkipReason::NotANumber));
        };
        self.store
            .set_position(item.id, &self.config.meta_field_name, position)?;
        debug!(item = %item.id, %position, "position saved");
        Ok(SaveOutcome::Stored(position))
    }

    /// The stored position of an item, [`Position::UNSET`] if none.
    pub fn position_of(&self, item: ItemId) -> SdkResult<Position> {
        Ok(self.store.get_position(item, &self.config.meta_field_name)?)
    }

    /// Drop an item's stored position. Returns `true` if one existed.
    pub fn clear_position(&self, item: ItemId) -> SdkResult<bool> {
        Ok(self.store.clear_position(item, &self.config.meta_field_name)?)
    }

    /// All stored positions, sorted by item id.
    pub fn positions(&self) -> SdkResult<Vec<(ItemId, Position)>> {
        Ok(self.store.positions(&self.config.meta_field_name)?)
    }

    // ---- Listing ----

    /// Evaluate the condition gate for a request.
    pub fn gate_outcome(&self, context: &RequestContext) -> GateOutcome {
        self.gate.evaluate(context)
    }

    /// Pinned items of `catalog` according to the stored positions.
    pub fn pinned_items(&self, catalog: &InMemoryCatalog) -> SdkResult<Vec<PinnedItem>> {
        let query = self.config.pin_query(self.host_page_size);
        Ok(catalog.with_store(&self.store).pinned_items(&query)?)
    }

    /// Reorder `base` for a request.
    ///
    /// Requests failing the condition gate get `base` back untouched. So do
    /// requests whose pinned item lookup fails: a broken lookup must never
    /// break the page.
    pub fn modify_listing(
        &self,
        context: &RequestContext,
        base: Vec<ContentItem>,
        source: &dyn PinnedItemSource,
    ) -> Vec<ContentItem> {
        if !self.gate.should_apply(context) {
            return base;
        }

        let query = self.config.pin_query(self.host_page_size);
        let pins = match source.pinned_items(&query) {
            Ok(pins) => pins,
            Err(e) => {
                warn!(error = %e, "pinned item lookup failed; leaving listing unchanged");
                return base;
            }
        };

        let (merged, summary) = self.merger.merge_with_summary(base, pins);
        debug!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            removed = summary.removed_duplicates,
            clamped = summary.clamped,
            "listing reordered"
        );
        merged
    }

    /// Render the listing of a request from `catalog`: the first page of
    /// supported items, with pinned items spliced in.
    pub fn listing(&self, context: &RequestContext, catalog: &InMemoryCatalog) -> Vec<ContentItem> {
        let base = catalog.listing(&self.config.supported_content_types, Some(self.page_size()));
        self.modify_listing(context, base, &catalog.with_store(&self.store))
    }

    /// Look up an item in `catalog` and save a submission for it.
    pub fn save_for(
        &self,
        catalog: &InMemoryCatalog,
        item: ItemId,
        form: &HashMap<String, String>,
    ) -> SdkResult<SaveOutcome> {
        let item = catalog.get(item).ok_or(SdkError::ItemNotFound(item))?;
        self.save_submission(item, form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpos_meta::{InMemoryMetaStore, MetaError, PinQuery};

    const FIELD: &str = "frontpage-post-position";

    fn plugin() -> PostPosition<InMemoryMetaStore> {
        PostPosition::new(PluginConfig::default(), InMemoryMetaStore::new()).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_items(
            (1u64..=6)
                .map(|raw| ContentItem::new(raw).with_title(format!("post {raw}")))
                .chain(std::iter::once(
                    ContentItem::new(50u64).with_content_type("page"),
                ))
                .collect(),
        )
        .unwrap()
    }

    fn form(value: &str) -> HashMap<String, String> {
        HashMap::from([(FIELD.to_string(), value.to_string())])
    }

    fn ids(items: &[ContentItem]) -> Vec<u64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    struct FailingSource;

    impl PinnedItemSource for FailingSource {
        fn pinned_items(&self, _query: &PinQuery) -> postpos_meta::Result<Vec<PinnedItem>> {
            Err(MetaError::LockPoisoned("boom".into()))
        }
    }

    // ---- Edit form ----

    #[test]
    fn numeric_submission_is_stored() {
        let plugin = plugin();
        let item = ContentItem::new(3u64);
        let outcome = plugin.save_submission(&item, &form("2")).unwrap();
        assert_eq!(outcome, SaveOutcome::Stored(Position::new(2)));
        assert_eq!(plugin.position_of(item.id).unwrap(), Position::new(2));
    }

    #[test]
    fn negative_submission_is_stored_as_magnitude() {
        let plugin = plugin();
        let item = ContentItem::new(3u64);
        plugin.save_submission(&item, &form("-4")).unwrap();
        assert_eq!(plugin.position_of(item.id).unwrap(), Position::new(4));
    }

    #[test]
    fn oversized_submission_pins_to_the_end() {
        let plugin = plugin().with_host_page_size(3);
        let catalog = catalog();
        let outcome = plugin
            .save_for(&catalog, ItemId::new(6), &form("99999999999999999999"))
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Stored(Position::new(u64::MAX)));

        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![1, 2, 3, 6]);
    }

    #[test]
    fn blank_and_garbage_submissions_keep_previous_value() {
        let plugin = plugin();
        let item = ContentItem::new(3u64);
        plugin.save_submission(&item, &form("5")).unwrap();

        assert_eq!(
            plugin.save_submission(&item, &form("  ")).unwrap(),
            SaveOutcome::Skipped(SkipReason::NoValue)
        );
        assert_eq!(
            plugin.save_submission(&item, &form("five")).unwrap(),
            SaveOutcome::Skipped(SkipReason::NotANumber)
        );
        assert_eq!(
            plugin.save_submission(&item, &HashMap::new()).unwrap(),
            SaveOutcome::Skipped(SkipReason::NoValue)
        );
        assert_eq!(plugin.position_of(item.id).unwrap(), Position::new(5));
    }

    #[test]
    fn zero_submission_unpins() {
        let plugin = plugin();
        let item = ContentItem::new(3u64);
        plugin.save_submission(&item, &form("5")).unwrap();
        plugin.save_submission(&item, &form("0")).unwrap();
        assert_eq!(plugin.position_of(item.id).unwrap(), Position::UNSET);
    }

    #[test]
    fn unsupported_type_is_skipped() {
        let plugin = plugin();
        let page = ContentItem::new(50u64).with_content_type("page");
        assert_eq!(
            plugin.save_submission(&page, &form("1")).unwrap(),
            SaveOutcome::Skipped(SkipReason::UnsupportedContentType)
        );
        assert!(plugin.positions().unwrap().is_empty());
    }

    #[test]
    fn save_for_unknown_item_is_an_error() {
        let plugin = plugin();
        let err = plugin.save_for(&catalog(), ItemId::new(999), &form("1")).unwrap_err();
        assert!(matches!(err, SdkError::ItemNotFound(id) if id == ItemId::new(999)));
    }

    #[test]
    fn clear_position_unpins() {
        let plugin = plugin();
        plugin.save_for(&catalog(), ItemId::new(2), &form("1")).unwrap();
        assert!(plugin.clear_position(ItemId::new(2)).unwrap());
        assert_eq!(plugin.position_of(ItemId::new(2)).unwrap(), Position::UNSET);
    }

    #[test]
    fn custom_field_name_is_used_for_form_and_store() {
        let config = PluginConfig {
            meta_field_name: "slot".into(),
            ..Default::default()
        };
        let plugin = PostPosition::new(config, InMemoryMetaStore::new()).unwrap();
        let item = ContentItem::new(1u64);
        let submitted = HashMap::from([("slot".to_string(), "3".to_string())]);
        plugin.save_submission(&item, &submitted).unwrap();
        assert_eq!(
            plugin.store().get_position(item.id, "slot").unwrap(),
            Position::new(3)
        );
        assert_eq!(plugin.store().get_position(item.id, FIELD).unwrap(), Position::UNSET);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PluginConfig {
            meta_field_name: String::new(),
            ..Default::default()
        };
        let result = PostPosition::new(config, InMemoryMetaStore::new());
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    // ---- Listing ----

    #[test]
    fn front_page_gets_pinned_items() {
        let plugin = plugin().with_host_page_size(4);
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(6), &form("2")).unwrap();

        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![1, 6, 2, 3, 4]);
    }

    #[test]
    fn pinned_item_on_the_page_is_moved_not_doubled() {
        let plugin = plugin().with_host_page_size(4);
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(3), &form("1")).unwrap();

        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![3, 1, 2, 4]);
    }

    #[test]
    fn other_requests_are_untouched() {
        let plugin = plugin().with_host_page_size(4);
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(6), &form("1")).unwrap();

        let listing = plugin.listing(&RequestContext::default().with_home(true), &catalog);
        assert_eq!(ids(&listing), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pins_follow_catalog_order_and_shift_each_other() {
        // Item 2 is processed before item 5, so 5 lands in slot 1 and pushes 2.
        let plugin = plugin().with_host_page_size(3);
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(2), &form("1")).unwrap();
        plugin.save_for(&catalog, ItemId::new(5), &form("1")).unwrap();

        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![5, 2, 1, 3]);
    }

    #[test]
    fn page_size_caps_pinned_items() {
        let config = PluginConfig {
            page_size: Some(1),
            ..Default::default()
        };
        let plugin = PostPosition::new(config, InMemoryMetaStore::new()).unwrap();
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(4), &form("1")).unwrap();
        plugin.save_for(&catalog, ItemId::new(5), &form("1")).unwrap();

        assert_eq!(plugin.pinned_items(&catalog).unwrap().len(), 1);
        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![4, 1]);
    }

    #[test]
    fn allow_doubles_shows_item_twice() {
        let config = PluginConfig {
            avoid_doubles: false,
            ..Default::default()
        };
        let plugin = PostPosition::new(config, InMemoryMetaStore::new())
            .unwrap()
            .with_host_page_size(3);
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(2), &form("1")).unwrap();

        let listing = plugin.listing(&RequestContext::front_page(), &catalog);
        assert_eq!(ids(&listing), vec![2, 1, 2, 3]);
    }

    #[test]
    fn failing_lookup_leaves_listing_unchanged() {
        let plugin = plugin();
        let base = vec![ContentItem::new(1u64), ContentItem::new(2u64)];
        let listing = plugin.modify_listing(&RequestContext::front_page(), base.clone(), &FailingSource);
        assert_eq!(listing, base);
    }

    #[test]
    fn custom_condition_opens_the_gate() {
        let config = PluginConfig {
            conditions: vec!["is_landing".into()],
            ..Default::default()
        };
        let mut plugin = PostPosition::new(config, InMemoryMetaStore::new())
            .unwrap()
            .with_host_page_size(2);
        plugin
            .registry_mut()
            .register_fn("is_landing", |ctx| ctx.has_flag("landing"));
        let catalog = catalog();
        plugin.save_for(&catalog, ItemId::new(5), &form("1")).unwrap();

        let ctx = RequestContext::default().with_flag("landing");
        assert!(plugin.gate_outcome(&ctx).applies());
        assert_eq!(ids(&plugin.listing(&ctx, &catalog)), vec![5, 1, 2]);
        assert_eq!(ids(&plugin.listing(&RequestContext::front_page(), &catalog)), vec![1, 2]);
    }
}
