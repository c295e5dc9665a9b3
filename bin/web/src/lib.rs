//! bingo browser client.
//!
//! This crate provides the Leptos-based user interface: the page
//! components, the route table, and the glue that mounts the router
//! against the browser's location.

#![allow(non_snake_case)]

pub mod app;
pub mod error;
pub mod location;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod screen;

/// Client entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    if let Err(report) = mount() {
        leptos::logging::error!("failed to start bingo: {report}");
    }
}

#[cfg(feature = "csr")]
fn mount() -> bingo_core::Result<(), error::StartError> {
    use crate::app::App;
    use crate::error::StartError;
    use crate::location::BrowserLocation;
    use crate::screen::{Screen, ScreenSurface};
    use bingo_core::RoutingConfig;
    use bingo_router::{RootMount, Router};
    use leptos::prelude::*;

    let config = RoutingConfig::from_toml(include_str!("../routing.toml")).map_err(|e| {
        StartError::ConfigInvalid {
            details: e.to_string(),
        }
    })?;
    let table = routes::route_table(&config).map_err(|e| StartError::Routes {
        details: e.to_string(),
    })?;
    let location = BrowserLocation::attach()?;

    let screen = RwSignal::new(Screen::Empty);
    let handle = RootMount::new(Router::new(table, location))
        .strict(config.strict_mode)
        .mount(ScreenSurface::new(screen));
    tracing::info!(state = ?handle.state(), "Router mounted");

    // The mount lives for the rest of the page's lifetime.
    let _mount: &'static _ = Box::leak(Box::new(handle));

    leptos::mount::mount_to_body(move || view! { <App screen=screen.read_only()/> });
    Ok(())
}
