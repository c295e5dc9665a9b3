//! Path patterns and structural matching.
//!
//! Grammar:
//!
//! - a pattern starts with `/`, or is exactly `*` (matches everything)
//! - `:name` captures one non-empty segment
//! - `:name?` optionally captures the final segment
//! - `*` as the final segment captures the rest of the path under `*`
//! - any other segment is literal
//!
//! Patterns that break these rules are kept but never match.

use bingo_core::{RoutingConfig, TrailingSlash};
use serde::Serialize;
use std::fmt;

/// Name under which a trailing wildcard stores the rest of the path.
pub const WILDCARD_PARAM: &str = "*";

/// Matching choices that are left to the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,
    /// Trailing slash policy.
    pub trailing_slash: TrailingSlash,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trailing_slash: TrailingSlash::Strict,
        }
    }
}

impl From<&RoutingConfig> for MatchOptions {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            trailing_slash: config.trailing_slash,
        }
    }
}

/// Why a pattern can never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// The pattern neither starts with `/` nor is `*`.
    MissingLeadingSlash,
    /// A `:` segment has no name.
    EmptyParamName { segment: usize },
    /// A `*` segment is followed by more segments.
    WildcardNotLast { segment: usize },
    /// An optional parameter is followed by more segments.
    OptionalNotLast { name: String },
    /// The same parameter name appears twice.
    DuplicateParam { name: String },
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLeadingSlash => write!(f, "pattern must start with '/' or be '*'"),
            Self::EmptyParamName { segment } => {
                write!(f, "segment {segment} has an empty parameter name")
            }
            Self::WildcardNotLast { segment } => {
                write!(f, "wildcard at segment {segment} is not the last segment")
            }
            Self::OptionalNotLast { name } => {
                write!(f, "optional parameter '{name}' is not the last segment")
            }
            Self::DuplicateParam { name } => write!(f, "parameter '{name}' appears twice"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Optional(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    CatchAll,
    Segments(Vec<Segment>),
    Malformed(Malformed),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    shape: Shape,
}

impl PathPattern {
    /// Parses a pattern. Never fails; see [`malformed`](Self::malformed).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let shape = if raw == "*" {
            Shape::CatchAll
        } else {
            match raw.strip_prefix('/') {
                Some(rest) => match parse_segments(rest) {
                    Ok(segments) => Shape::Segments(segments),
                    Err(reason) => Shape::Malformed(reason),
                },
                None => Shape::Malformed(Malformed::MissingLeadingSlash),
            }
        };
        Self {
            raw: raw.to_string(),
            shape,
        }
    }

    /// The pattern as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this is the unconditional catch-all `*`.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.shape, Shape::CatchAll)
    }

    /// Whether every segment is literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        match &self.shape {
            Shape::Segments(segments) => segments
                .iter()
                .all(|segment| matches!(segment, Segment::Literal(_))),
            _ => false,
        }
    }

    /// The reason this pattern can never match, if any.
    #[must_use]
    pub fn malformed(&self) -> Option<&Malformed> {
        match &self.shape {
            Shape::Malformed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Tests `path` against the pattern, returning captured parameters on a
    /// match.
    #[must_use]
    pub fn matches(&self, path: &str, options: MatchOptions) -> Option<Params> {
        match &self.shape {
            Shape::CatchAll => Some(Params::default()),
            Shape::Malformed(_) => None,
            Shape::Segments(segments) => {
                let rest = path.strip_prefix('/')?;
                let parts: Vec<&str> = rest.split('/').collect();
                let pattern = trim_trailing(segments, options, |s| {
                    matches!(s, Segment::Literal(lit) if lit.is_empty())
                });
                let parts = trim_trailing(&parts, options, |part| part.is_empty());
                match_segments(pattern, parts, options)
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segments(rest: &str) -> Result<Vec<Segment>, Malformed> {
    let raw: Vec<&str> = rest.split('/').collect();
    let last = raw.len() - 1;
    let mut names: Vec<&str> = Vec::new();
    let mut segments = Vec::with_capacity(raw.len());

    for (index, part) in raw.iter().enumerate() {
        let segment = if *part == "*" {
            if index != last {
                return Err(Malformed::WildcardNotLast { segment: index });
            }
            Segment::Wildcard
        } else if let Some(name) = part.strip_prefix(':') {
            let (name, optional) = match name.strip_suffix('?') {
                Some(name) => (name, true),
                None => (name, false),
            };
            if name.is_empty() {
                return Err(Malformed::EmptyParamName { segment: index });
            }
            if names.contains(&name) {
                return Err(Malformed::DuplicateParam {
                    name: name.to_string(),
                });
            }
            names.push(name);
            if optional {
                if index != last {
                    return Err(Malformed::OptionalNotLast {
                        name: name.to_string(),
                    });
                }
                Segment::Optional(name.to_string())
            } else {
                Segment::Param(name.to_string())
            }
        } else {
            Segment::Literal((*part).to_string())
        };
        segments.push(segment);
    }

    Ok(segments)
}

// Drops one empty trailing segment under `TrailingSlash::Ignore`, but never
// the only segment, so `/` keeps meaning the root.
fn trim_trailing<T>(items: &[T], options: MatchOptions, is_empty: impl Fn(&T) -> bool) -> &[T] {
    match items.split_last() {
        Some((last, init))
            if options.trailing_slash == TrailingSlash::Ignore
                && !init.is_empty()
                && is_empty(last) =>
        {
            init
        }
        _ => items,
    }
}

fn match_segments(pattern: &[Segment], parts: &[&str], options: MatchOptions) -> Option<Params> {
    let mut params = Params::default();

    for (index, segment) in pattern.iter().enumerate() {
        match segment {
            Segment::Literal(literal) => {
                let part = parts.get(index)?;
                if !literal_eq(literal, part, options.case_sensitive) {
                    return None;
                }
            }
            Segment::Param(name) => {
                let part = parts.get(index).filter(|part| !part.is_empty())?;
                params.push(name, part);
            }
            Segment::Optional(name) => {
                if parts.len() > index + 1 {
                    return None;
                }
                if let Some(part) = parts.get(index).filter(|part| !part.is_empty()) {
                    params.push(name, part);
                }
                return Some(params);
            }
            Segment::Wildcard => {
                let rest = parts.get(index..).unwrap_or_default().join("/");
                params.push(WILDCARD_PARAM, &rest);
                return Some(params);
            }
        }
    }

    (parts.len() == pattern.len()).then_some(params)
}

fn literal_eq(literal: &str, part: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        literal == part
    } else {
        literal.to_lowercase() == part.to_lowercase()
    }
}

/// A captured parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Parameter name from the pattern.
    pub name: String,
    /// Segment text from the location, undecoded.
    pub value: String,
}

/// Parameters captured by a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<Param>);

impl Params {
    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|param| (param.name.as_str(), param.value.as_str()))
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push(Param {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
