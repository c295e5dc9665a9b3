//! Views and route content.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A node type the router can produce on its own.
///
/// Views build arbitrary nodes; the router itself only ever needs inline
/// text (fallback content) and an empty node (nothing matched and no
/// fallback configured).
pub trait Renderable {
    /// A node showing `text`.
    fn text(text: &str) -> Self;

    /// A node that renders nothing.
    fn empty() -> Self;
}

impl Renderable for String {
    fn text(text: &str) -> Self {
        text.to_string()
    }

    fn empty() -> Self {
        String::new()
    }
}

/// A stateless producer of a renderable node.
pub struct View<N> {
    name: &'static str,
    render: Arc<dyn Fn() -> N + Send + Sync>,
}

impl<N> View<N> {
    /// Wraps a render function. `name` is used in logs.
    pub fn new(name: &'static str, render: impl Fn() -> N + Send + Sync + 'static) -> Self {
        Self {
            name,
            render: Arc::new(render),
        }
    }

    /// The name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the view.
    pub fn render(&self) -> N {
        (self.render)()
    }
}

impl<N> Clone for View<N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            render: Arc::clone(&self.render),
        }
    }
}

impl<N> fmt::Debug for View<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("View").field(&self.name).finish()
    }
}

/// What a route renders: a view, or literal text.
pub enum Content<N> {
    /// Render by invoking a view.
    View(View<N>),
    /// Render literal text through [`Renderable::text`].
    Text(Cow<'static, str>),
}

impl<N: Renderable> Content<N> {
    /// Produces the node for this content.
    pub fn render(&self) -> N {
        match self {
            Self::View(view) => view.render(),
            Self::Text(text) => N::text(text),
        }
    }
}

impl<N> Content<N> {
    /// Short description for logs: the view name or the literal text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::View(view) => view.name(),
            Self::Text(text) => text.as_ref(),
        }
    }
}

impl<N> Clone for Content<N> {
    fn clone(&self) -> Self {
        match self {
            Self::View(view) => Self::View(view.clone()),
            Self::Text(text) => Self::Text(text.clone()),
        }
    }
}

impl<N> fmt::Debug for Content<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View(view) => f.debug_tuple("View").field(&view.name()).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

impl<N> From<View<N>> for Content<N> {
    fn from(view: View<N>) -> Self {
        Self::View(view)
    }
}

impl<N> From<&'static str> for Content<N> {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<N> From<String> for Content<N> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}
