//! Request condition gate for Post Position.
//!
//! The listing is only reordered on some requests (by default, the site's
//! front page). Which requests qualify is expressed as a list of condition
//! names resolved against a [`ConditionRegistry`]; the gate opens when ANY of
//! them holds. Unknown names resolve to `false`.
//!
//! # Quick Start
//!
//! ```rust
//! use postpos_gate::{ConditionGate, ConditionRegistry, GateConfig, RequestContext};
//!
//! let gate = ConditionGate::new(ConditionRegistry::with_builtins(), GateConfig::default());
//! assert!(gate.should_apply(&RequestContext::front_page()));
//! assert!(!gate.should_apply(&RequestContext::default()));
//! ```

pub mod condition;
pub mod config;
pub mod context;
pub mod gate;
pub mod registry;

// Re-exports for convenience.
pub use condition::{Condition, ConditionResult, FnCondition};
pub use config::GateConfig;
pub use context::RequestContext;
pub use gate::{ConditionGate, GateOutcome};
pub use registry::ConditionRegistry;
