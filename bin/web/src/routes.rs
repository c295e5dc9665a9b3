//! The application's route table.

use crate::screen::Screen;
use bingo_core::{Result, RoutingConfig};
use bingo_router::{MatchOptions, RouteError, RouteTable, View};

/// Text shown when no route matches.
pub const NOT_FOUND: &str = "404, Not Found";

/// The home view.
pub fn home() -> Screen {
    Screen::Home
}

/// Builds the route table used by the client.
///
/// # Errors
///
/// Returns an error if the registrations fail validation.
pub fn route_table(config: &RoutingConfig) -> Result<RouteTable<Screen>, RouteError> {
    RouteTable::builder()
        .route("/", View::new("home", home))
        .fallback(NOT_FOUND)
        .options(MatchOptions::from(config))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_core::TrailingSlash;
    use bingo_router::{Location, MemoryLocation, Renderable, RootMount, Router, RouterState};

    fn render(table: &RouteTable<Screen>, raw: &str) -> Screen {
        table.resolve(&Location::parse(raw)).render()
    }

    #[test]
    fn root_shows_home() {
        let table = route_table(&RoutingConfig::default()).expect("valid table");
        assert_eq!(render(&table, "/"), Screen::Home);
        assert_eq!(render(&table, "/?invite=abc"), Screen::Home);
    }

    #[test]
    fn unknown_paths_show_not_found() {
        let table = route_table(&RoutingConfig::default()).expect("valid table");
        for raw in ["/missing", "/games/1", "", "/index.html"] {
            assert_eq!(render(&table, raw), Screen::text(NOT_FOUND), "location {raw:?}");
        }
    }

    #[test]
    fn config_controls_matching() {
        let config = RoutingConfig {
            trailing_slash: TrailingSlash::Ignore,
            ..RoutingConfig::default()
        };
        let table = route_table(&config).expect("valid table");
        assert_eq!(table.options(), MatchOptions::from(&config));
        assert_eq!(render(&table, "/"), Screen::Home);
    }

    #[test]
    fn mounted_table_tracks_location() {
        let table = route_table(&RoutingConfig::default()).expect("valid table");
        let source = MemoryLocation::new("/nope");
        let handle = RootMount::new(Router::new(table, source.clone()))
            .strict(true)
            .mount(Vec::new());
        assert_eq!(handle.state(), RouterState::Unresolved);

        source.navigate("/");
        handle.with_surface(|screens| {
            assert_eq!(*screens, vec![Screen::text(NOT_FOUND), Screen::Home]);
        });
        assert_eq!(handle.impure_renders(), 0);
    }

    #[test]
    fn shipped_config_is_valid() {
        let config = RoutingConfig::from_toml(include_str!("../routing.toml"))
            .expect("embedded config should load");
        assert!(config.strict_mode);
        assert!(route_table(&config).is_ok());
    }
}
