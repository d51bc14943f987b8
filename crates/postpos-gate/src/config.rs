use serde::{Deserialize, Serialize};

/// The condition names consulted by a [`crate::ConditionGate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Condition names; the gate opens if any of them evaluates to `true`.
    pub conditions: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            conditions: vec!["is_front_page".into()],
        }
    }
}

impl GateConfig {
    pub fn new<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
    }
}
