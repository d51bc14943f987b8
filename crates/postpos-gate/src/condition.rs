use std::fmt;

use crate::context::RequestContext;

// ---------------------------------------------------------------------------
// Condition trait
// ---------------------------------------------------------------------------

/// A named yes/no question about the current request.
///
/// The trait is object-safe and `Send + Sync` so conditions can be stored in
/// a registry as `Box<dyn Condition>` and shared across request threads.
pub trait Condition: Send + Sync {
    /// The name under which the condition is looked up (e.g. `is_front_page`).
    fn name(&self) -> &str;

    /// Evaluate the condition for a request.
    fn evaluate(&self, context: &RequestContext) -> bool;
}

// ---------------------------------------------------------------------------
// FnCondition
// ---------------------------------------------------------------------------

/// Adapts a closure into a [`Condition`].
pub struct FnCondition<F> {
    name: String,
    predicate: F,
}

impl<F> FnCondition<F>
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> Condition for FnCondition<F>
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, context: &RequestContext) -> bool {
        (self.predicate)(context)
    }
}

impl<F> fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCondition").field("name", &self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// ConditionResult
// ---------------------------------------------------------------------------

/// Recorded result of one configured condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionResult {
    /// The configured condition name.
    pub name: String,
    /// Whether the name matched a registered condition.
    pub resolved: bool,
    /// Whether the condition held. Always `false` when unresolved.
    pub passed: bool,
}
