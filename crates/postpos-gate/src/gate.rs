use tracing::debug;

use crate::condition::ConditionResult;
use crate::config::GateConfig;
use crate::context::RequestContext;
use crate::registry::ConditionRegistry;

// ---------------------------------------------------------------------------
// GateOutcome
// ---------------------------------------------------------------------------

/// The outcome of evaluating every configured condition for a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateOutcome {
    /// Per-condition results in configuration order.
    pub results: Vec<ConditionResult>,
}

impl GateOutcome {
    /// Returns `true` if at least one condition held.
    pub fn applies(&self) -> bool {
        self.results.iter().any(|r| r.passed)
    }

    /// Configured names that matched no registered condition.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| !r.resolved)
            .map(|r| r.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConditionGate
// ---------------------------------------------------------------------------

/// Decides whether the listing of a request gets reordered.
///
/// The gate opens if ANY configured condition holds. A name without a
/// registered condition counts as `false`; it is never an error.
#[derive(Debug)]
pub struct ConditionGate {
    registry: ConditionRegistry,
    config: GateConfig,
}

impl ConditionGate {
    pub fn new(registry: ConditionRegistry, config: GateConfig) -> Self {
        Self { registry, config }
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConditionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConditionRegistry {
        &mut self.registry
    }

    /// Evaluate every configured condition and record the results.
    ///
    /// All conditions run even after one has passed, so the outcome is a
    /// complete trace of the request.
    pub fn evaluate(&self, context: &RequestContext) -> GateOutcome {
        let results = self
            .config
            .conditions
            .iter()
            .map(|name| match self.registry.get(name) {
                Some(condition) => ConditionResult {
                    name: name.clone(),
                    resolved: true,
                    passed: condition.evaluate(context),
                },
                None => {
                    debug!(condition = %name, "unknown condition; treating as false");
                    ConditionResult {
                        name: name.clone(),
                        resolved: false,
                        passed: false,
                    }
                }
            })
            .collect();

        GateOutcome { results }
    }

    /// Returns `true` if any configured condition holds for this request.
    pub fn should_apply(&self, context: &RequestContext) -> bool {
        let outcome = self.evaluate(context);
        let applies = outcome.applies();
        debug!(applies, conditions = outcome.results.len(), "condition gate evaluated");
        applies
    }
}
