//! Wizard error types.

use thiserror::Error;

/// Errors produced by navigation operations.
///
/// Anything not listed here degrades to the last known-good state instead
/// of failing: unknown paths keep the current step, empty-list `init` skips
/// its redirect, and out-of-range `go` calls clamp.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardError {
    /// Navigation was requested against an empty step list.
    #[error("wizard has no steps")]
    NoSteps,

    /// No step follows the active one; the wizard is at its final step.
    #[error("no step follows the active step")]
    Complete,
}
