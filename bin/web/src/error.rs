//! Error types for starting the browser client.

use std::fmt;

/// Errors that stop the client from mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// There is no `window` (not running in a browser).
    NoWindow,
    /// A browser event listener could not be registered.
    Listener { details: String },
    /// The embedded routing configuration is invalid.
    ConfigInvalid { details: String },
    /// The route table failed validation.
    Routes { details: String },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no browser window available"),
            Self::Listener { details } => {
                write!(f, "failed to register location listener: {details}")
            }
            Self::ConfigInvalid { details } => {
                write!(f, "invalid routing configuration: {details}")
            }
            Self::Routes { details } => write!(f, "invalid route table: {details}"),
        }
    }
}

impl std::error::Error for StartError {}
