//! Locations and the sources that supply them.
//!
//! A [`LocationSource`] is owned by the host environment (the browser's
//! history, or [`MemoryLocation`] when running headless). The router only
//! reads the current location and subscribes to changes; it never navigates.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// The current navigable address.
///
/// Only [`path`](Self::path) takes part in route matching. The query and
/// fragment are kept so the location can be displayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// Splits a raw address into path, query and fragment.
    ///
    /// The fragment starts at the first `#`, the query at the first `?`
    /// before it. No decoding or normalization is applied.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The fragment without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

/// Callback invoked with the new location after every change.
pub type Listener = Box<dyn FnMut(&Location)>;

/// Supplies the current location and notifies on change.
pub trait LocationSource {
    /// Returns the current location.
    fn current(&self) -> Location;

    /// Registers a listener for location changes.
    ///
    /// The listener stays registered until the returned [`Subscription`]
    /// is dropped.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

impl<T: LocationSource + ?Sized> LocationSource for Rc<T> {
    fn current(&self) -> Location {
        (**self).current()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }
}

/// Guard for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription that runs `cancel` when dropped.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Creates a subscription with nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct MemoryState {
    current: Location,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
    // Set while a notification pass has the listeners taken out.
    notifying: bool,
    // Navigation requested by a listener during a pass; delivered next.
    pending: Option<Location>,
    // Listeners unsubscribed during the current pass.
    cancelled: Vec<u64>,
}

/// An in-memory location source.
///
/// Used when no browser is available and in tests. Cloning shares the same
/// state, so a clone can drive navigation while the router holds another.
#[derive(Clone)]
pub struct MemoryLocation {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryLocation {
    /// Creates a source positioned at `initial`.
    pub fn new(initial: impl Into<Location>) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryState {
                current: initial.into(),
                listeners: Vec::new(),
                next_id: 0,
                notifying: false,
                pending: None,
                cancelled: Vec::new(),
            })),
        }
    }

    /// Moves to `to` and notifies listeners.
    ///
    /// Navigating to the current location is not a change and notifies
    /// nobody. A navigation made by a listener while others are being
    /// notified is queued: the running pass stops handing out the stale
    /// location and every listener then receives the new one.
    pub fn navigate(&self, to: impl Into<Location>) {
        let to = to.into();
        {
            let mut state = self.state.borrow_mut();
            if state.current == to {
                return;
            }
            state.current = to.clone();
            if state.notifying {
                state.pending = Some(to);
                return;
            }
        }
        self.notify(to);
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn notify(&self, mut location: Location) {
        loop {
            let mut listeners = {
                let mut state = self.state.borrow_mut();
                state.notifying = true;
                std::mem::take(&mut state.listeners)
            };

            for (id, listener) in &mut listeners {
                let (superseded, cancelled) = {
                    let state = self.state.borrow();
                    (state.pending.is_some(), state.cancelled.contains(id))
                };
                if superseded {
                    break;
                }
                if !cancelled {
                    listener(&location);
                }
            }

            let mut state = self.state.borrow_mut();
            let cancelled = std::mem::take(&mut state.cancelled);
            listeners.retain(|(id, _)| !cancelled.contains(id));
            // Listeners subscribed during notification were pushed onto the
            // now-empty list; keep them after the existing ones.
            listeners.append(&mut state.listeners);
            state.listeners = listeners;

            match state.pending.take() {
                Some(next) => location = next,
                None => {
                    state.notifying = false;
                    return;
                }
            }
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationSource for MemoryLocation {
    fn current(&self) -> Location {
        self.state.borrow().current.clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<MemoryState>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            let before = state.listeners.len();
            state.listeners.retain(|(existing, _)| *existing != id);
            if state.listeners.len() == before && state.notifying {
                state.cancelled.push(id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn parse_splits_query_and_fragment() {
        let location = Location::parse("/games/7?tab=board#row-3");
        assert_eq!(location.path(), "/games/7");
        assert_eq!(location.query(), Some("tab=board"));
        assert_eq!(location.fragment(), Some("row-3"));
        assert_eq!(location.to_string(), "/games/7?tab=board#row-3");
    }

    #[test]
    fn question_mark_after_fragment_stays_in_fragment() {
        let location = Location::parse("/a#b?c");
        assert_eq!(location.path(), "/a");
        assert_eq!(location.query(), None);
        assert_eq!(location.fragment(), Some("b?c"));
    }

    #[test]
    fn plain_path_has_no_query_or_fragment() {
        let location = Location::from("/");
        assert_eq!(location.path(), "/");
        assert!(location.query().is_none());
        assert!(location.fragment().is_none());
    }

    #[test]
    fn location_serializes_components() {
        let json = serde_json::to_value(Location::parse("/x?y=1")).expect("serialize");
        assert_eq!(json["path"], "/x");
        assert_eq!(json["query"], "y=1");
        assert!(json["fragment"].is_null());
    }

    #[test]
    fn navigate_notifies_listeners() {
        let source = MemoryLocation::new("/");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |location| {
            sink.borrow_mut().push(location.path().to_string());
        }));

        source.navigate("/one");
        source.navigate("/two");

        assert_eq!(*seen.borrow(), vec!["/one", "/two"]);
        assert_eq!(source.current().path(), "/two");
    }

    #[test]
    fn navigating_to_current_location_is_not_a_change() {
        let source = MemoryLocation::new("/same");
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = source.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));

        source.navigate("/same");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let source = MemoryLocation::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = source.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(source.listener_count(), 1);

        drop(sub);
        source.navigate("/elsewhere");

        assert_eq!(calls.get(), 0);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn listener_can_read_current_location() {
        let source = MemoryLocation::default();
        let reader = source.clone();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |_| {
            *sink.borrow_mut() = Some(reader.current());
        }));

        source.navigate("/read");
        assert_eq!(seen.borrow().as_ref().map(Location::path), Some("/read"));
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_notification() {
        let source = MemoryLocation::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let own = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let sub = source.subscribe(Box::new(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        source.navigate("/first");
        source.navigate("/second");

        assert_eq!(calls.get(), 1);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn redirect_from_listener_reaches_every_listener() {
        let source = MemoryLocation::new("/");
        let redirector = source.clone();
        let _redirect = source.subscribe(Box::new(move |location| {
            if location.path() == "/old" {
                redirector.navigate("/new");
            }
        }));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |location| {
            sink.borrow_mut().push(location.path().to_string());
        }));

        source.navigate("/old");

        assert_eq!(source.current().path(), "/new");
        assert_eq!(*seen.borrow(), vec!["/new"]);
    }

    #[test]
    fn later_listener_redirect_is_delivered_after_the_pass() {
        let source = MemoryLocation::new("/");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |location| {
            sink.borrow_mut().push(location.path().to_string());
        }));

        let redirector = source.clone();
        let _redirect = source.subscribe(Box::new(move |location| {
            if location.path() == "/old" {
                redirector.navigate("/new");
            }
        }));

        source.navigate("/old");

        assert_eq!(*seen.borrow(), vec!["/old", "/new"]);
        assert_eq!(source.listener_count(), 2);
    }

    #[test]
    fn listener_dropped_by_an_earlier_one_is_skipped_and_removed() {
        let source = MemoryLocation::default();
        let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim_slot);
        let redirector = source.clone();
        let _killer = source.subscribe(Box::new(move |location| {
            slot.borrow_mut().take();
            if location.path() == "/a" {
                redirector.navigate("/b");
            }
        }));

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let victim = source.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));
        *victim_slot.borrow_mut() = Some(victim);

        source.navigate("/a");
        source.navigate("/c");

        assert_eq!(calls.get(), 0);
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let sub = {
            let source = MemoryLocation::default();
            source.subscribe(Box::new(|_| {}))
        };
        drop(sub);
    }
}
