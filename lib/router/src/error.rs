//! Error types for the router crate.
//!
//! Unmatched locations and malformed patterns are not errors: the first
//! renders the fallback, the second never matches. Only registration
//! mistakes that can be detected up front are reported here.

use std::fmt;

/// Errors from registering routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A route was registered with an empty pattern string.
    EmptyPattern,
    /// A route was registered after the unconditional catch-all and can
    /// never be selected.
    UnreachableEntry { pattern: String, shadowed_by: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "route pattern must not be empty"),
            Self::UnreachableEntry {
                pattern,
                shadowed_by,
            } => {
                write!(
                    f,
                    "route '{pattern}' is unreachable: registered after catch-all '{shadowed_by}'"
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
