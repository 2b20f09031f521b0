//! Read-only navigation context snapshots.

use crate::history::{History, Location};
use crate::step::{Step, WizardState};

/// Read-only snapshot of the wizard handed to delegates and the
/// presentation callback.
///
/// A fresh value is projected from the controller state on every change;
/// nothing the controller hands out is ever mutated in place, so snapshots
/// are safe to keep or pass between consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardContext {
    /// Currently active step, `None` before initialization resolves one.
    pub step: Option<Step>,
    /// Ordered step list; order defines next-step adjacency.
    pub steps: Vec<Step>,
    /// Current location of the underlying history.
    pub location: Location,
    /// Visited locations, oldest first.
    pub entries: Vec<Location>,
}

impl WizardContext {
    /// Pure projection `(state, history) -> context`.
    pub(crate) fn project(state: &WizardState, history: &dyn History) -> Self {
        Self {
            step: state.step.clone(),
            steps: state.steps.clone(),
            location: history.location(),
            entries: history.entries(),
        }
    }

    /// Id of the active step, if any.
    pub fn step_id(&self) -> Option<&str> {
        self.step.as_ref().map(|s| s.id.as_str())
    }
}
