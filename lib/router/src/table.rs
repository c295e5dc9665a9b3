//! Route entries, the route table and the matching algorithm.

use crate::error::RouteError;
use crate::location::Location;
use crate::pattern::{Malformed, MatchOptions, Params, PathPattern};
use crate::router::RouterState;
use crate::view::{Content, Renderable};
use bingo_core::Result;
use tracing::{debug, warn};

/// A pattern paired with the content it renders.
#[derive(Debug, Clone)]
pub struct RouteEntry<N> {
    pattern: PathPattern,
    content: Content<N>,
}

impl<N> RouteEntry<N> {
    /// Creates an entry.
    ///
    /// Malformed patterns are accepted and never match; only an empty
    /// pattern is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyPattern`] if `pattern` is empty.
    pub fn new(pattern: &str, content: impl Into<Content<N>>) -> Result<Self, RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::EmptyPattern.into());
        }
        Ok(Self {
            pattern: PathPattern::parse(pattern),
            content: content.into(),
        })
    }

    /// The entry's pattern.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The entry's content.
    #[must_use]
    pub fn content(&self) -> &Content<N> {
        &self.content
    }
}

/// The outcome of evaluating a location against a [`RouteTable`].
#[derive(Debug)]
pub enum Resolution<'a, N> {
    /// An entry matched.
    Matched {
        /// Position of the entry in registration order.
        index: usize,
        /// The matching entry.
        entry: &'a RouteEntry<N>,
        /// Parameters captured by the entry's pattern.
        params: Params,
    },
    /// Nothing matched; the table's fallback applies.
    Fallback(&'a Content<N>),
    /// Nothing matched and there is no fallback.
    Empty,
}

impl<N> Resolution<'_, N> {
    /// The router state this resolution corresponds to.
    #[must_use]
    pub fn state(&self) -> RouterState {
        match self {
            Self::Matched {
                index,
                entry,
                params,
            } => RouterState::Resolved {
                index: *index,
                pattern: entry.pattern().as_str().to_string(),
                params: params.clone(),
            },
            Self::Fallback(_) | Self::Empty => RouterState::Unresolved,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Matched { entry, .. } => entry.pattern().as_str(),
            Self::Fallback(_) => "<fallback>",
            Self::Empty => "<none>",
        }
    }
}

impl<N: Renderable> Resolution<'_, N> {
    /// Renders the selected content, or the empty node.
    pub fn render(&self) -> N {
        match self {
            Self::Matched { entry, .. } => entry.content().render(),
            Self::Fallback(content) => content.render(),
            Self::Empty => N::empty(),
        }
    }
}

/// An immutable, ordered set of route entries with an optional fallback.
///
/// Entries are evaluated in registration order and the first structural
/// match wins; there is no specificity ranking. The fallback lives in its
/// own slot so it is always evaluated last.
#[derive(Debug, Clone)]
pub struct RouteTable<N> {
    entries: Vec<RouteEntry<N>>,
    fallback: Option<Content<N>>,
    options: MatchOptions,
}

impl<N> RouteTable<N> {
    /// Starts building a table.
    #[must_use]
    pub fn builder() -> RouteTableBuilder<N> {
        RouteTableBuilder::default()
    }

    /// Entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<N>] {
        &self.entries
    }

    /// The fallback content, if configured.
    #[must_use]
    pub fn fallback(&self) -> Option<&Content<N>> {
        self.fallback.as_ref()
    }

    /// The matching options in effect.
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Entries whose pattern can never match, with the reason.
    pub fn malformed(&self) -> impl Iterator<Item = (&PathPattern, &Malformed)> {
        self.entries.iter().filter_map(|entry| {
            entry
                .pattern()
                .malformed()
                .map(|reason| (entry.pattern(), reason))
        })
    }

    /// Finds the first entry whose pattern matches `location`.
    #[must_use]
    pub fn find(&self, location: &Location) -> Option<(usize, &RouteEntry<N>, Params)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| {
                entry
                    .pattern()
                    .matches(location.path(), self.options)
                    .map(|params| (index, entry, params))
            })
    }

    /// Selects what to render for `location`.
    #[must_use]
    pub fn resolve(&self, location: &Location) -> Resolution<'_, N> {
        let resolution = match self.find(location) {
            Some((index, entry, params)) => Resolution::Matched {
                index,
                entry,
                params,
            },
            None => match &self.fallback {
                Some(content) => Resolution::Fallback(content),
                None => Resolution::Empty,
            },
        };
        debug!(location = %location, selected = resolution.label(), "Resolved location");
        resolution
    }
}

/// Builder for [`RouteTable`].
///
/// Registration errors are held until [`build`](Self::build) so routes can
/// be chained.
pub struct RouteTableBuilder<N> {
    entries: Vec<RouteEntry<N>>,
    fallback: Option<Content<N>>,
    options: MatchOptions,
    error: Option<RouteError>,
}

impl<N> Default for RouteTableBuilder<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
            options: MatchOptions::default(),
            error: None,
        }
    }
}

impl<N> RouteTableBuilder<N> {
    /// Registers a route after all previously registered ones.
    #[must_use = "This method returns a new RouteTableBuilder and does not modify self"]
    pub fn route(mut self, pattern: &str, content: impl Into<Content<N>>) -> Self {
        if pattern.is_empty() {
            if self.error.is_none() {
                self.error = Some(RouteError::EmptyPattern);
            }
            return self;
        }
        self.entries.push(RouteEntry {
            pattern: PathPattern::parse(pattern),
            content: content.into(),
        });
        self
    }

    /// Registers an already constructed entry.
    #[must_use = "This method returns a new RouteTableBuilder and does not modify self"]
    pub fn entry(mut self, entry: RouteEntry<N>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Sets the content rendered when no entry matches.
    #[must_use = "This method returns a new RouteTableBuilder and does not modify self"]
    pub fn fallback(mut self, content: impl Into<Content<N>>) -> Self {
        self.fallback = Some(content.into());
        self
    }

    /// Sets the matching options.
    #[must_use = "This method returns a new RouteTableBuilder and does not modify self"]
    pub fn options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the registrations and freezes the table.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, or
    /// [`RouteError::UnreachableEntry`] if a route follows the catch-all `*`.
    pub fn build(self) -> Result<RouteTable<N>, RouteError> {
        if let Some(error) = self.error {
            return Err(error.into());
        }

        if let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.pattern().is_catch_all())
        {
            if let Some(shadowed) = self.entries.get(position + 1) {
                return Err(RouteError::UnreachableEntry {
                    pattern: shadowed.pattern().as_str().to_string(),
                    shadowed_by: self.entries[position].pattern().as_str().to_string(),
                }
                .into());
            }
            if self.fallback.is_some() {
                warn!("Fallback content is unreachable behind a catch-all route");
            }
        }

        for entry in &self.entries {
            if let Some(reason) = entry.pattern().malformed() {
                warn!(
                    pattern = %entry.pattern(),
                    reason = %reason,
                    "Route pattern is malformed and will never match"
                );
            }
        }

        Ok(RouteTable {
            entries: self.entries,
            fallback: self.fallback,
            options: self.options,
        })
    }
}
