//! Wizard - step-sequencing controller for multi-screen flows
//!
//! Tracks an ordered collection of named steps, maps navigation history to
//! the currently active step, and exposes an imperative API (advance,
//! retreat, jump, initialize) to the surrounding application. Rendering is
//! left entirely to the host: the controller only hands out fresh
//! [`WizardContext`] snapshots through caller-supplied callbacks.
//!
//! The controller depends on the [`History`] capability contract rather
//! than any concrete navigation mechanism; [`MemoryHistory`] is the default
//! in-memory implementation used when the host supplies none.

pub mod context;
pub mod controller;
pub mod error;
pub mod history;
pub mod step;

pub use context::WizardContext;
pub use controller::{OnChange, OnNext, Wizard, WizardConfig, WizardHandle};
pub use error::WizardError;
pub use history::{History, HistoryListener, ListenerId, Location, MemoryHistory};
pub use step::Step;
