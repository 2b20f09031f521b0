//! Navigation history abstraction layer.
//!
//! Provides a trait-based abstraction over history operations to enable:
//! - Host-supplied history integrations (shells, routers, test doubles)
//! - A default in-memory implementation for standalone wizards
//! - Unit testing without any host navigation machinery

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single visited location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pathname)
    }
}

/// Callback invoked with the new location after every navigation.
pub type HistoryListener = Rc<dyn Fn(&Location)>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// History capability contract the wizard controller depends on.
///
/// Implementations notify listeners synchronously, after the entry list has
/// been updated, so callers observe the new location as soon as a navigation
/// call returns. Listeners must not navigate the same history from inside a
/// notification.
pub trait History {
    /// Current location.
    fn location(&self) -> Location;

    /// Visited locations, oldest first.
    fn entries(&self) -> Vec<Location>;

    /// Navigate to `path`, adding a new entry.
    fn push(&self, path: &str);

    /// Navigate to `path`, overwriting the current entry.
    fn replace(&self, path: &str);

    /// Move `n` entries through history (negative = back). Out-of-range
    /// moves clamp to the history bounds.
    fn go(&self, n: isize);

    /// Move one entry back.
    fn go_back(&self) {
        self.go(-1);
    }

    /// Register a location-changed listener.
    fn listen(&self, listener: HistoryListener) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored,
    /// making teardown safe to repeat.
    fn unlisten(&self, id: ListenerId);
}

#[derive(Debug)]
struct Entries {
    entries: Vec<Location>,
    index: usize,
}

/// Default in-memory history with no persisted entries.
///
/// Starts at a single `/` entry. Interior mutability keeps every operation
/// on `&self`, so the adapter can be shared behind an `Rc` between the
/// controller and the host.
pub struct MemoryHistory {
    inner: RefCell<Entries>,
    listeners: RefCell<Vec<(ListenerId, HistoryListener)>>,
    next_listener_id: Cell<u64>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_entries(["/"])
    }

    /// History seeded with already-visited paths; the last one is current.
    /// An empty seed falls back to the single `/` entry.
    pub fn with_entries<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<Location> = paths.into_iter().map(Location::new).collect();
        if entries.is_empty() {
            entries.push(Location::new("/"));
        }
        let index = entries.len() - 1;
        Self {
            inner: RefCell::new(Entries { entries, index }),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
        }
    }

    fn notify(&self, location: &Location) {
        // Snapshot so a listener may unregister itself mid-notification.
        let listeners: Vec<HistoryListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(location);
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    fn entries(&self) -> Vec<Location> {
        self.inner.borrow().entries.clone()
    }

    fn push(&self, path: &str) {
        let location = Location::new(path);
        {
            let mut inner = self.inner.borrow_mut();
            let keep = inner.index + 1;
            inner.entries.truncate(keep);
            inner.entries.push(location.clone());
            inner.index = inner.entries.len() - 1;
        }
        debug!(path, "history push");
        self.notify(&location);
    }

    fn replace(&self, path: &str) {
        let location = Location::new(path);
        {
            let mut inner = self.inner.borrow_mut();
            let index = inner.index;
            inner.entries[index] = location.clone();
        }
        debug!(path, "history replace");
        self.notify(&location);
    }

    fn go(&self, n: isize) {
        let moved = {
            let mut inner = self.inner.borrow_mut();
            let last = inner.entries.len() as isize - 1;
            let target = (inner.index as isize + n).clamp(0, last) as usize;
            if target == inner.index {
                None
            } else {
                inner.index = target;
                Some(inner.entries[target].clone())
            }
        };
        if let Some(location) = moved {
            debug!(n = %n, path = %location.pathname, "history go");
            self.notify(&location);
        }
    }

    fn listen(&self, listener: HistoryListener) -> ListenerId {
        let id = ListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}
