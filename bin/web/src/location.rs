//! Browser location source.
//!
//! Reads `window.location` and follows every way the address can change
//! without a page load: back/forward (`popstate`), fragment edits
//! (`hashchange`) and script calls to `history.pushState` /
//! `history.replaceState`. The history methods do not fire events on their
//! own, so they are wrapped to dispatch one named after the method.

use bingo_router::Location;

/// Window events that signal a location change.
pub const TRACKED_EVENTS: [&str; 4] = ["popstate", "pushState", "replaceState", "hashchange"];

/// History methods wrapped to dispatch an event of the same name.
pub const PATCHED_METHODS: [&str; 2] = ["pushState", "replaceState"];

/// Joins the pieces of `window.location` into a [`Location`].
///
/// `search` keeps its leading `?` and `hash` its leading `#`, as the
/// browser reports them.
#[must_use]
pub fn compose(path: &str, search: &str, hash: &str) -> Location {
    let path = if path.is_empty() { "/" } else { path };
    Location::parse(&format!("{path}{search}{hash}"))
}

#[cfg(feature = "csr")]
pub use browser::BrowserLocation;

#[cfg(feature = "csr")]
mod browser {
    use super::{PATCHED_METHODS, TRACKED_EVENTS, compose};
    use crate::error::StartError;
    use bingo_core::Result;
    use bingo_router::{Listener, Location, LocationSource, MemoryLocation, Subscription};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    type JsResult = std::result::Result<JsValue, JsValue>;
    type HistoryWrapper = Closure<dyn FnMut(JsValue, JsValue, JsValue) -> JsResult>;

    /// Location source backed by the browser's history.
    pub struct BrowserLocation {
        memory: MemoryLocation,
        _on_change: Closure<dyn FnMut()>,
        _history: Vec<HistoryWrapper>,
    }

    impl BrowserLocation {
        /// Reads the current location and starts following changes.
        ///
        /// # Errors
        ///
        /// Returns an error outside a browser, if a listener cannot be
        /// registered, or if the history methods cannot be wrapped.
        pub fn attach() -> Result<Self, StartError> {
            let window = web_sys::window().ok_or(StartError::NoWindow)?;
            let memory = MemoryLocation::new(read_location(&window.location()));

            let tracker = memory.clone();
            let on_change = Closure::<dyn FnMut()>::new(move || {
                if let Some(window) = web_sys::window() {
                    tracker.navigate(read_location(&window.location()));
                }
            });
            for event in TRACKED_EVENTS {
                window
                    .add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref())
                    .map_err(listener_error)?;
            }

            let history = PATCHED_METHODS
                .into_iter()
                .map(|method| wrap_history_method(&window, method))
                .collect::<Result<Vec<_>, StartError>>()?;
            tracing::debug!(events = ?TRACKED_EVENTS, "Following browser location");

            Ok(Self {
                memory,
                _on_change: on_change,
                _history: history,
            })
        }
    }

    impl LocationSource for BrowserLocation {
        fn current(&self) -> Location {
            self.memory.current()
        }

        fn subscribe(&self, listener: Listener) -> Subscription {
            self.memory.subscribe(listener)
        }
    }

    // Replaces `history[method]` with a function that calls the original and
    // then dispatches `method` as an event on the window.
    fn wrap_history_method(
        window: &web_sys::Window,
        method: &'static str,
    ) -> Result<HistoryWrapper, StartError> {
        let history = window.history().map_err(listener_error)?;
        let key = JsValue::from_str(method);
        let original: js_sys::Function = js_sys::Reflect::get(&history, &key)
            .map_err(listener_error)?
            .dyn_into()
            .map_err(listener_error)?;

        let target = history.clone();
        let wrapper = HistoryWrapper::new(
            move |state: JsValue, title: JsValue, url: JsValue| -> JsResult {
                let result = original.call3(&target, &state, &title, &url)?;
                if let Some(window) = web_sys::window() {
                    window.dispatch_event(&web_sys::Event::new(method)?)?;
                }
                Ok(result)
            },
        );
        js_sys::Reflect::set(&history, &key, wrapper.as_ref()).map_err(listener_error)?;
        Ok(wrapper)
    }

    fn read_location(location: &web_sys::Location) -> Location {
        compose(
            &location.pathname().unwrap_or_else(|_| "/".to_string()),
            &location.search().unwrap_or_default(),
            &location.hash().unwrap_or_default(),
        )
    }

    fn listener_error(e: JsValue) -> StartError {
        StartError::Listener {
            details: format!("{e:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_splits_search_and_hash() {
        let location = compose("/lobby", "?game=7", "#board");
        assert_eq!(location.path(), "/lobby");
        assert_eq!(location.query(), Some("game=7"));
        assert_eq!(location.fragment(), Some("board"));
    }

    #[test]
    fn compose_without_search_or_hash() {
        let location = compose("/", "", "");
        assert_eq!(location, Location::parse("/"));
        assert_eq!(location.query(), None);
        assert_eq!(location.fragment(), None);
    }

    #[test]
    fn empty_pathname_is_root() {
        assert_eq!(compose("", "", "#top").path(), "/");
    }

    #[test]
    fn tracks_history_and_fragment_changes() {
        for event in ["popstate", "hashchange"] {
            assert!(TRACKED_EVENTS.contains(&event), "{event}");
        }
        for method in PATCHED_METHODS {
            assert!(TRACKED_EVENTS.contains(&method), "{method}");
        }
    }
}
