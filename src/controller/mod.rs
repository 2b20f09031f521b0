//! The wizard controller: step/history synchronization and navigation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::context::WizardContext;
use crate::error::WizardError;
use crate::history::{History, HistoryListener, ListenerId, Location, MemoryHistory};
use crate::step::{next_step_id, path_to_step, Step, WizardState};


/// Delegate invoked by [`Wizard::next`] instead of navigating. Receives the
/// current context and a handle it can use to drive navigation itself.
pub type OnNext = Rc<dyn Fn(&WizardContext, &WizardHandle)>;

/// Presentation callback invoked with a fresh context after every state
/// change.
pub type OnChange = Rc<dyn Fn(&WizardContext)>;

/// Configuration accepted at construction.
pub struct WizardConfig {
    basename: String,
    history: Option<Rc<dyn History>>,
    on_next: Option<OnNext>,
    on_change: Option<OnChange>,
}

impl WizardConfig {
    pub fn new() -> Self {
        Self {
            basename: String::new(),
            history: None,
            on_next: None,
            on_change: None,
        }
    }

    /// Path prefix scoping the wizard's own location segment.
    pub fn basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = basename.into();
        self
    }

    /// Use a host-supplied history adapter instead of a fresh in-memory one.
    pub fn history(mut self, history: impl History + 'static) -> Self {
        self.history = Some(Rc::new(history));
        self
    }

    /// Use a history adapter the host keeps a shared handle to.
    pub fn shared_history(mut self, history: Rc<dyn History>) -> Self {
        self.history = Some(history);
        self
    }

    /// Intercept [`Wizard::next`]. When set, `next` never navigates on its
    /// own; the delegate decides whether to proceed (e.g. after validating
    /// the current step) and navigates through the handle it receives.
    pub fn on_next(mut self, on_next: impl Fn(&WizardContext, &WizardHandle) + 'static) -> Self {
        self.on_next = Some(Rc::new(on_next));
        self
    }

    /// Presentation callback receiving a fresh [`WizardContext`] after every
    /// state change.
    pub fn on_change(mut self, on_change: impl Fn(&WizardContext) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// Build the controller: registers the location listener and fires the
    /// one-time priming `on_next` call.
    pub fn build(self) -> Wizard {
        Wizard::with_config(self)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle over the wizard's state and history.
///
/// Cheap to clone. Exposes every navigation operation except `init`, which
/// lives on [`Wizard`] alone; this is what the `on_next` delegate receives.
#[derive(Clone)]
pub struct WizardHandle {
    basename: String,
    history: Rc<dyn History>,
    state: Rc<RefCell<WizardState>>,
}

impl WizardHandle {
    fn prefix(&self) -> String {
        format!("{}/", self.basename)
    }

    fn step_path(&self, id: &str) -> String {
        format!("{}/{id}", self.basename)
    }

    /// Resolve an explicit target id, defaulting to the step after the
    /// active one.
    fn target_id(&self, step_id: Option<&str>) -> Result<String, WizardError> {
        if let Some(id) = step_id {
            return Ok(id.to_owned());
        }
        let state = self.state.borrow();
        if state.steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        next_step_id(&state)
            .map(str::to_owned)
            .ok_or(WizardError::Complete)
    }

    /// Navigate to `step_id` (default: the next step), adding a history
    /// entry. The active step reflects the move before this returns.
    pub fn push(&self, step_id: Option<&str>) -> Result<(), WizardError> {
        let id = self.target_id(step_id)?;
        debug!(step = %id, "push");
        self.history.push(&self.step_path(&id));
        Ok(())
    }

    /// Navigate to `step_id` (default: the next step), overwriting the
    /// current history entry.
    pub fn replace(&self, step_id: Option<&str>) -> Result<(), WizardError> {
        let id = self.target_id(step_id)?;
        debug!(step = %id, "replace");
        self.history.replace(&self.step_path(&id));
        Ok(())
    }

    /// Relative history navigation.
    pub fn go(&self, n: isize) {
        self.history.go(n);
    }

    /// Move one history entry back.
    pub fn previous(&self) {
        self.history.go_back();
    }

    /// Fresh read-only snapshot of the current state.
    pub fn context(&self) -> WizardContext {
        WizardContext::project(&self.state.borrow(), self.history.as_ref())
    }

    /// The underlying history adapter.
    pub fn history(&self) -> Rc<dyn History> {
        Rc::clone(&self.history)
    }
}

/// Step-sequencing controller for a multi-screen flow.
///
/// Owns the ordered step list and the active step, keeps both in sync with
/// a [`History`] adapter, and exposes the imperative navigation API.
///
/// ```
/// use wizard::{Step, WizardConfig};
///
/// let wizard = WizardConfig::new().basename("/setup").build();
/// wizard.init(vec![Step::new("welcome"), Step::new("confirm")]);
/// assert_eq!(wizard.step().map(|s| s.id), Some("welcome".to_string()));
///
/// wizard.push(None).unwrap();
/// assert_eq!(wizard.step().map(|s| s.id), Some("confirm".to_string()));
/// ```
pub struct Wizard {
    handle: WizardHandle,
    on_next: Option<OnNext>,
    on_change: Option<OnChange>,
    listener: Option<ListenerId>,
}

impl Wizard {
    /// Controller with defaults: empty basename, fresh in-memory history.
    pub fn new() -> Self {
        WizardConfig::new().build()
    }

    fn with_config(config: WizardConfig) -> Self {
        let history: Rc<dyn History> = config
            .history
            .unwrap_or_else(|| Rc::new(MemoryHistory::new()));
        let handle = WizardHandle {
            basename: config.basename,
            history,
            state: Rc::new(RefCell::new(WizardState::default())),
        };

        let listener = handle
            .history
            .listen(Self::location_listener(&handle, config.on_change.clone()));

        let wizard = Self {
            handle,
            on_next: config.on_next,
            on_change: config.on_change,
            listener: Some(listener),
        };

        // One-time priming call so the host receives its wizard handle
        // before any navigation happens. Never repeated, not even on
        // re-initialization.
        if let Some(on_next) = &wizard.on_next {
            debug!("priming on_next delegate");
            on_next(&wizard.context(), &wizard.handle);
        }

        wizard
    }

    /// Listener updating the active step on every location change. This is
    /// the only path by which the active step advances once a delegate
    /// intercepts `next`.
    fn location_listener(handle: &WizardHandle, on_change: Option<OnChange>) -> HistoryListener {
        let prefix = handle.prefix();
        let state = Rc::clone(&handle.state);
        let history: Weak<dyn History> = Rc::downgrade(&handle.history);
        Rc::new(move |location: &Location| {
            let resolved = {
                let current = state.borrow();
                path_to_step(&current, &prefix, &location.pathname)
            };
            debug!(
                path = %location.pathname,
                step = ?resolved.as_ref().map(|s| s.id.as_str()),
                "location changed"
            );
            state.borrow_mut().step = resolved;
            if let (Some(on_change), Some(history)) = (&on_change, history.upgrade()) {
                on_change(&WizardContext::project(&state.borrow(), history.as_ref()));
            }
        })
    }

    /// Replace the step list and resolve the active step from the current
    /// location, redirecting to the first step when nothing matches.
    pub fn init(&self, steps: Vec<Step>) {
        self.handle.state.borrow_mut().steps = steps;

        let pathname = self.handle.history.location().pathname;
        let resolved = {
            let state = self.handle.state.borrow();
            path_to_step(&state, &self.handle.prefix(), &pathname)
        };
        match resolved {
            Some(step) => {
                debug!(step = %step.id, "init resolved active step");
                self.handle.state.borrow_mut().step = Some(step);
                self.emit_change();
            }
            None => {
                let first = self.handle.state.borrow().steps.first().map(|s| s.id.clone());
                if let Some(id) = first {
                    // The listener fires synchronously and sets the active
                    // step before replace returns.
                    debug!(step = %id, "init redirecting to first step");
                    self.handle.history.replace(&self.handle.step_path(&id));
                } else {
                    warn!("init with empty step list, skipping redirect");
                }
            }
        }
    }

    /// Advance to the step after the active one, or hand control to the
    /// `on_next` delegate when one was configured.
    pub fn next(&self) -> Result<(), WizardError> {
        if let Some(on_next) = &self.on_next {
            debug!("next intercepted by delegate");
            on_next(&self.context(), &self.handle);
            Ok(())
        } else {
            self.push(None)
        }
    }

    /// Navigate to `step_id` (default: the next step), adding a history
    /// entry. The default target skips the `on_next` delegate; only
    /// [`Wizard::next`] consults it.
    pub fn push(&self, step_id: Option<&str>) -> Result<(), WizardError> {
        self.handle.push(step_id)
    }

    /// Navigate to `step_id` (default: the next step), overwriting the
    /// current history entry.
    pub fn replace(&self, step_id: Option<&str>) -> Result<(), WizardError> {
        self.handle.replace(step_id)
    }

    /// Relative history navigation.
    pub fn go(&self, n: isize) {
        self.handle.go(n);
    }

    /// Move one history entry back.
    pub fn previous(&self) {
        self.handle.previous();
    }

    /// Fresh read-only snapshot of the current state.
    pub fn context(&self) -> WizardContext {
        self.handle.context()
    }

    /// Shared handle exposing the navigation operations (everything except
    /// `init`).
    pub fn handle(&self) -> WizardHandle {
        self.handle.clone()
    }

    /// The underlying history adapter.
    pub fn history(&self) -> Rc<dyn History> {
        self.handle.history()
    }

    /// Currently active step, if any.
    pub fn step(&self) -> Option<Step> {
        self.handle.state.borrow().step.clone()
    }

    /// Current step list.
    pub fn steps(&self) -> Vec<Step> {
        self.handle.state.borrow().steps.clone()
    }

    /// Unregister the location listener. Idempotent; also runs on drop, so
    /// external navigation after teardown never reaches this controller.
    pub fn dispose(&mut self) {
        if let Some(id) = self.listener.take() {
            debug!("disposing wizard listener");
            self.handle.history.unlisten(id);
        }
    }

    fn emit_change(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(&self.context());
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Wizard {
    fn drop(&mut self) {
        self.dispose();
    }
}
