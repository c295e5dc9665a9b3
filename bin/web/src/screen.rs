//! The node type the router produces for this client, and the surface that
//! hands it to Leptos.
//!
//! The router decides *which* screen shows; Leptos reconciles the chosen
//! screen into the DOM whenever the signal changes.

use bingo_router::{DisplaySurface, Renderable};
use leptos::prelude::*;

/// A renderable description of what the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The home page.
    Home,
    /// Literal text, such as the not-found message.
    Text(String),
    /// Nothing.
    Empty,
}

impl Renderable for Screen {
    fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    fn empty() -> Self {
        Self::Empty
    }
}

/// Display surface backed by a Leptos signal.
pub struct ScreenSurface {
    screen: RwSignal<Screen>,
}

impl ScreenSurface {
    /// Writes reconciled screens into `screen`.
    pub fn new(screen: RwSignal<Screen>) -> Self {
        Self { screen }
    }
}

impl DisplaySurface<Screen> for ScreenSurface {
    fn reconcile(&mut self, node: Screen) {
        // Skip identical screens so Leptos does not rebuild the page.
        if self.screen.get_untracked() != node {
            self.screen.set(node);
        }
    }
}
