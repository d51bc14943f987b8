use std::collections::BTreeMap;
use std::fmt;

use crate::condition::{Condition, FnCondition};
use crate::context::RequestContext;

/// Maps condition names to their implementations.
///
/// Lookups by unknown name simply miss; the gate turns a miss into `false`.
#[derive(Default)]
pub struct ConditionRegistry {
    conditions: BTreeMap<String, Box<dyn Condition>>,
}

impl ConditionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the request-type conditions:
    /// `is_front_page`, `is_home`, `is_archive`, `is_search`, `is_singular`
    /// and `is_paged`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_fn("is_front_page", |ctx| ctx.front_page);
        registry.register_fn("is_home", |ctx| ctx.home);
        registry.register_fn("is_archive", |ctx| ctx.archive);
        registry.register_fn("is_search", |ctx| ctx.search);
        registry.register_fn("is_singular", |ctx| ctx.singular);
        registry.register_fn("is_paged", RequestContext::is_paged);
        registry
    }

    /// Register a condition under its own name, returning any condition it
    /// replaced.
    pub fn register(&mut self, condition: Box<dyn Condition>) -> Option<Box<dyn Condition>> {
        self.conditions.insert(condition.name().to_string(), condition)
    }

    /// Register a closure under `name`.
    pub fn register_fn<F>(&mut self, name: &str, predicate: F) -> Option<Box<dyn Condition>>
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.register(Box::new(FnCondition::new(name, predicate)))
    }

    /// Remove a condition by name.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Condition>> {
        self.conditions.remove(name)
    }

    /// Look up a condition by name.
    pub fn get(&self, name: &str) -> Option<&dyn Condition> {
        self.conditions.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("names", &self.conditions.keys().collect::<Vec<_>>())
            .finish()
    }
}
