//! The router: a route table bound to a location source.

use crate::location::{Location, LocationSource, Subscription};
use crate::pattern::Params;
use crate::table::RouteTable;
use crate::view::Renderable;
use serde::Serialize;
use std::rc::Rc;
use std::sync::Arc;
use tracing::instrument;

/// Which of the router's two states a location puts it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RouterState {
    /// An entry matched and its content renders.
    Resolved {
        /// Position of the entry in registration order.
        index: usize,
        /// The entry's pattern.
        pattern: String,
        /// Parameters captured by the pattern.
        params: Params,
    },
    /// No entry matched; fallback content (or nothing) renders.
    Unresolved,
}

/// Binds a [`RouteTable`] to a [`LocationSource`].
///
/// The location source is injected so the router can run against the
/// browser or against a [`MemoryLocation`](crate::MemoryLocation). The
/// router never changes the location itself.
pub struct Router<N> {
    table: Arc<RouteTable<N>>,
    source: Rc<dyn LocationSource>,
}

impl<N> Router<N> {
    /// Creates a router over `table` reading from `source`.
    pub fn new(table: RouteTable<N>, source: impl LocationSource + 'static) -> Self {
        Self::from_shared(Arc::new(table), source)
    }

    /// Creates a router over a table shared with other consumers.
    pub fn from_shared(table: Arc<RouteTable<N>>, source: impl LocationSource + 'static) -> Self {
        Self {
            table,
            source: Rc::new(source),
        }
    }

    /// The route table.
    #[must_use]
    pub fn table(&self) -> &Arc<RouteTable<N>> {
        &self.table
    }

    /// The source's current location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.source.current()
    }

    /// State for the current location.
    #[must_use]
    pub fn state(&self) -> RouterState {
        self.state_for(&self.location())
    }

    /// State for an arbitrary location.
    #[must_use]
    #[instrument(skip_all, fields(location = %location))]
    pub fn state_for(&self, location: &Location) -> RouterState {
        self.table.resolve(location).state()
    }

    /// Calls `listener` with every new location.
    pub fn watch(&self, listener: impl FnMut(&Location) + 'static) -> Subscription {
        self.source.subscribe(Box::new(listener))
    }
}

impl<N: Renderable + 'static> Router<N> {
    /// Renders the current location.
    #[must_use]
    pub fn render(&self) -> N {
        self.render_for(&self.location())
    }

    /// Renders an arbitrary location.
    #[must_use]
    pub fn render_for(&self, location: &Location) -> N {
        self.table.resolve(location).render()
    }

    /// Calls `listener` with the rendered output after every location
    /// change.
    pub fn subscribe(&self, mut listener: impl FnMut(N) + 'static) -> Subscription {
        let table = Arc::clone(&self.table);
        self.watch(move |location| listener(table.resolve(location).render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::MemoryLocation;
    use crate::view::View;
    use std::cell::RefCell;

    fn table() -> RouteTable<String> {
        RouteTable::builder()
            .route("/", View::new("home", || "home".to_string()))
            .route("/games/:id", View::new("game", || "game".to_string()))
            .fallback("404, Not Found")
            .build()
            .expect("valid table")
    }

    #[test]
    fn initial_state_comes_from_source() {
        let router = Router::new(table(), MemoryLocation::new("/games/3"));
        assert_eq!(router.render(), "game");
        match router.state() {
            RouterState::Resolved { params, .. } => assert_eq!(params.get("id"), Some("3")),
            RouterState::Unresolved => panic!("expected a match"),
        }
    }

    #[test]
    fn state_follows_navigation() {
        let source = MemoryLocation::new("/");
        let router = Router::new(table(), source.clone());
        assert!(matches!(router.state(), RouterState::Resolved { index: 0, .. }));

        source.navigate("/missing");
        assert_eq!(router.state(), RouterState::Unresolved);
        assert_eq!(router.render(), "404, Not Found");
    }

    #[test]
    fn subscribers_receive_rendered_output() {
        let source = MemoryLocation::new("/");
        let router = Router::new(table(), source.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = router.subscribe(move |node| sink.borrow_mut().push(node));

        source.navigate("/games/1");
        source.navigate("/nowhere");
        source.navigate("/");

        assert_eq!(*seen.borrow(), vec!["game", "404, Not Found", "home"]);
    }

    #[test]
    fn router_does_not_change_location() {
        let source = MemoryLocation::new("/nowhere");
        let router = Router::new(table(), source.clone());
        let _ = router.render();
        let _ = router.state();
        assert_eq!(source.current().path(), "/nowhere");
    }

    #[test]
    fn shared_table_is_reused() {
        let shared = Arc::new(table());
        let first = Router::from_shared(Arc::clone(&shared), MemoryLocation::new("/"));
        let second = Router::from_shared(Arc::clone(&shared), MemoryLocation::new("/x"));
        assert_eq!(first.render(), "home");
        assert_eq!(second.render(), "404, Not Found");
        assert!(Arc::ptr_eq(first.table(), second.table()));
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(RouterState::Unresolved).expect("serialize");
        assert_eq!(json["state"], "unresolved");
    }
}
