//! Step definitions and step/location resolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An addressable unit of the wizard's flow.
///
/// Identity is the `id`, which doubles as the step's path segment. Anything
/// else the host attaches to a step rides along in `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Unique step identifier.
    pub id: String,
    /// Arbitrary step-specific fields.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Step {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meta: Map::new(),
        }
    }
}

/// Controller-owned state: the ordered step list and the active step.
///
/// Replaced or updated only inside `init` and the location-changed handler;
/// everything handed out to consumers is a snapshot taken from here.
#[derive(Debug, Default)]
pub(crate) struct WizardState {
    /// Ordered step list; insertion order defines next-step adjacency.
    pub(crate) steps: Vec<Step>,
    /// Currently active step, `None` until a location resolves one.
    pub(crate) step: Option<Step>,
}

/// Resolve a raw pathname to a step.
///
/// Strips the basename prefix and exact-matches the remainder against step
/// ids. An unrecognized path preserves the current active step rather than
/// clearing it, so unrelated navigation events never destabilize the wizard.
pub(crate) fn path_to_step(state: &WizardState, prefix: &str, pathname: &str) -> Option<Step> {
    let matched = pathname
        .strip_prefix(prefix)
        .and_then(|id| state.steps.iter().find(|s| s.id == id));
    matched.cloned().or_else(|| state.step.clone())
}

/// Id of the step following the active one in list order, if any.
pub(crate) fn next_step_id(state: &WizardState) -> Option<&str> {
    let active = state.step.as_ref()?;
    let index = state.steps.iter().position(|s| s.id == active.id)?;
    state.steps.get(index + 1).map(|s| s.id.as_str())
}
