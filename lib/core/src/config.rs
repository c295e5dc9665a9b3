//! Routing configuration.
//!
//! This module provides strongly-typed configuration for route matching,
//! loaded via the `config` crate from environment variables, TOML text or a
//! file. The routing core never reads the environment itself; the
//! application loads a [`RoutingConfig`] and hands it to the router.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// How a trailing `/` on a path is treated during matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    /// `/a` and `/a/` are different paths.
    #[default]
    Strict,
    /// One trailing slash is ignored on both pattern and path.
    Ignore,
}

/// Route matching and mounting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutingConfig {
    /// Whether literal path segments compare case-sensitively.
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    /// Trailing slash policy.
    #[serde(default)]
    pub trailing_slash: TrailingSlash,

    /// Whether the root mount double-invokes views to detect impure renders.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
}

fn default_case_sensitive() -> bool {
    true
}

fn default_strict_mode() -> bool {
    true
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            case_sensitive: default_case_sensitive(),
            trailing_slash: TrailingSlash::default(),
            strict_mode: default_strict_mode(),
        }
    }
}

impl RoutingConfig {
    /// Loads configuration from `ROUTING__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(environment())
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has invalid values.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::load(::config::File::from_str(text, ::config::FileFormat::Toml))
    }

    /// Loads configuration from a file; the format follows its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(::config::File::from(path.as_ref()))
    }

    fn load<S>(source: S) -> Result<Self, ConfigError>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let config = ::config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| ConfigError::Load {
                details: e.to_string(),
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::Load {
                details: e.to_string(),
            })?;
        Ok(config)
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("ROUTING")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn routing_config_has_correct_defaults() {
        let config = RoutingConfig::default();
        assert!(config.case_sensitive);
        assert_eq!(config.trailing_slash, TrailingSlash::Strict);
        assert!(config.strict_mode);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = RoutingConfig::from_toml("").expect("empty toml should load");
        assert_eq!(config, RoutingConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let config = RoutingConfig::from_toml(
            "case_sensitive = false\ntrailing_slash = \"ignore\"\nstrict_mode = false\n",
        )
        .expect("toml should load");
        assert!(!config.case_sensitive);
        assert_eq!(config.trailing_slash, TrailingSlash::Ignore);
        assert!(!config.strict_mode);
    }

    #[test]
    fn invalid_trailing_slash_is_rejected() {
        let err = RoutingConfig::from_toml("trailing_slash = \"sometimes\"")
            .expect_err("unknown policy should fail");
        assert!(err.to_string().contains("routing config"));
    }

    #[test]
    fn environment_variables_are_read() {
        let mut vars = ::config::Map::new();
        vars.insert("ROUTING__CASE_SENSITIVE".to_string(), "false".to_string());
        vars.insert("ROUTING__TRAILING_SLASH".to_string(), "ignore".to_string());

        let config = RoutingConfig::load(environment().source(Some(vars)))
            .expect("env should load");
        assert!(!config.case_sensitive);
        assert_eq!(config.trailing_slash, TrailingSlash::Ignore);
        assert!(config.strict_mode);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp file");
        writeln!(file, "strict_mode = false").expect("write config");

        let config = RoutingConfig::from_file(file.path()).expect("file should load");
        assert!(!config.strict_mode);
        assert!(config.case_sensitive);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = RoutingConfig::from_file(dir.path().join("absent.toml"));
        assert!(result.is_err());
    }
}
