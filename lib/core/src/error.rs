//! Error handling foundation for the bingo front-end.
//!
//! This module provides the `Result` type alias using rootcause, plus the
//! configuration error shared by every consumer of [`RoutingConfig`].
//! Other crates define their own domain error types in their own error
//! modules.
//!
//! [`RoutingConfig`]: crate::RoutingConfig

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Errors from loading routing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    Load { details: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { details } => write!(f, "failed to load routing config: {details}"),
        }
    }
}

impl std::error::Error for ConfigError {}
