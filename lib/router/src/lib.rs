//! Client-side routing for the bingo front-end.
//!
//! This crate provides:
//!
//! - **Route Table**: ordered route entries plus a fallback slot
//! - **Router**: binds a route table to an injected location source
//! - **Root Mount**: attaches the router's output to a display surface,
//!   optionally double-invoking views to catch impure renders
//!
//! The crate is renderer-agnostic: views produce any node type that
//! implements [`Renderable`], and reconciliation is left to a
//! [`DisplaySurface`].

pub mod error;
pub mod location;
pub mod mount;
pub mod pattern;
pub mod router;
pub mod surface;
pub mod table;
pub mod view;

pub use error::RouteError;
pub use location::{Listener, Location, LocationSource, MemoryLocation, Subscription};
pub use mount::{MountHandle, RootMount};
pub use pattern::{Malformed, MatchOptions, Param, Params, PathPattern, WILDCARD_PARAM};
pub use router::{Router, RouterState};
pub use surface::DisplaySurface;
pub use table::{Resolution, RouteEntry, RouteTable, RouteTableBuilder};
pub use view::{Content, Renderable, View};
