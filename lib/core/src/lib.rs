//! Core types and utilities for the bingo front-end.
//!
//! This crate provides the error handling foundation and the routing
//! configuration shared by the router and the web client.

pub mod config;
pub mod error;

pub use crate::config::{RoutingConfig, TrailingSlash};
pub use error::{ConfigError, Result};
