//! Root mount: attaches a router to a display surface.
//!
//! Mounting renders the current location synchronously, hands the node to
//! the surface, and re-renders on every location change. In strict mode
//! the selected content is invoked twice per render and the outputs are
//! compared, which flags views that are not pure functions.

use crate::location::{Location, Subscription};
use crate::router::{Router, RouterState};
use crate::surface::DisplaySurface;
use crate::table::RouteTable;
use crate::view::Renderable;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, warn};

/// Composes a router with the strictness check, ready to mount.
pub struct RootMount<N> {
    router: Router<N>,
    strict: bool,
}

impl<N> RootMount<N>
where
    N: Renderable + PartialEq + 'static,
{
    /// Wraps `router`. Strict mode is off until enabled.
    pub fn new(router: Router<N>) -> Self {
        Self {
            router,
            strict: false,
        }
    }

    /// Enables or disables double invocation of views.
    #[must_use = "This method returns a new RootMount and does not modify self"]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Renders into `surface` and keeps it in sync with the location.
    ///
    /// Consumes the mount, so each composition attaches once.
    pub fn mount<S>(self, surface: S) -> MountHandle<N, S>
    where
        S: DisplaySurface<N> + 'static,
    {
        let renderer = Rc::new(StrictRenderer {
            table: Arc::clone(self.router.table()),
            strict: self.strict,
            impure: Cell::new(0),
        });
        let surface = Rc::new(RefCell::new(surface));

        let location = self.router.location();
        info!(location = %location, strict = self.strict, "Mounting router");
        surface.borrow_mut().reconcile(renderer.render(&location));

        let subscription = {
            let renderer = Rc::clone(&renderer);
            let surface = Rc::clone(&surface);
            self.router.watch(move |location| {
                let node = renderer.render(location);
                surface.borrow_mut().reconcile(node);
            })
        };

        MountHandle {
            router: self.router,
            surface,
            renderer,
            _subscription: subscription,
        }
    }
}

struct StrictRenderer<N> {
    table: Arc<RouteTable<N>>,
    strict: bool,
    impure: Cell<usize>,
}

impl<N: Renderable + PartialEq> StrictRenderer<N> {
    fn render(&self, location: &Location) -> N {
        let resolution = self.table.resolve(location);
        let first = resolution.render();
        if !self.strict {
            return first;
        }

        let second = resolution.render();
        if first != second {
            self.impure.set(self.impure.get() + 1);
            warn!(
                location = %location,
                "View rendered different output on repeated invocation"
            );
        }
        second
    }
}

/// A mounted router. Dropping the handle stops location tracking.
pub struct MountHandle<N, S> {
    router: Router<N>,
    surface: Rc<RefCell<S>>,
    renderer: Rc<StrictRenderer<N>>,
    _subscription: Subscription,
}

impl<N, S> MountHandle<N, S> {
    /// The mounted router.
    #[must_use]
    pub fn router(&self) -> &Router<N> {
        &self.router
    }

    /// The router's state for the current location.
    #[must_use]
    pub fn state(&self) -> RouterState {
        self.router.state()
    }

    /// Number of renders where a view's two invocations disagreed.
    #[must_use]
    pub fn impure_renders(&self) -> usize {
        self.renderer.impure.get()
    }

    /// Runs `f` with the display surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.surface.borrow())
    }
}
