//! Declarative tree nodes
//!
//! A tree is built from plain values: elements emitted as output, fragments
//! grouping siblings, scopes publishing a derived context, list scopes
//! repeating a template per item, and components running caller code
//! against the nearest context.

use crate::error::TreeError;
use crate::list::ListScope;
use crate::render::Scope;
use fieldscope_core::{keys, Attributes, ReadOnly, ScopeError, ScopeOverrides};
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// One node of a declarative tree
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Renders nothing
    #[default]
    Empty,

    /// Output element, emitted unchanged
    Element(Element),

    /// Ordered siblings
    Fragment(Vec<Node>),

    /// Publishes a derived context to its children
    Scope(ScopeNode),

    /// Publishes one indexed scope per item
    List(ListScope),

    /// Caller code producing a subtree
    Component(Component),
}

impl Node {
    /// Output element of `kind` with `props`
    #[inline]
    #[must_use]
    pub fn element(kind: impl Into<String>, props: Attributes) -> Self {
        Self::Element(Element::new(kind, props))
    }

    /// Group siblings
    #[inline]
    #[must_use]
    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// Component from a closure
    pub fn component<F>(label: impl Into<String>, render: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<Node, TreeError> + Send + Sync + 'static,
    {
        Self::Component(Component::new(label, render))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<ScopeNode> for Node {
    fn from(scope: ScopeNode) -> Self {
        Self::Scope(scope)
    }
}

impl From<ListScope> for Node {
    fn from(list: ListScope) -> Self {
        Self::List(list)
    }
}

impl From<Component> for Node {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl From<Vec<Node>> for Node {
    fn from(children: Vec<Node>) -> Self {
        Self::Fragment(children)
    }
}

/// Output element handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Element {
    kind: String,
    props: Attributes,
}

impl Element {
    /// Create element
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<String>, props: Attributes) -> Self {
        Self {
            kind: kind.into(),
            props,
        }
    }

    /// Element kind (what the caller's widget layer should build)
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Element properties
    #[inline]
    #[must_use]
    pub fn props(&self) -> &Attributes {
        &self.props
    }

    /// `name` property, if it is a string
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.props.get_str(keys::NAME)
    }

    /// `readOnly` property, if it is a boolean
    #[inline]
    #[must_use]
    pub fn read_only(&self) -> Option<bool> {
        self.props.get(keys::READ_ONLY).and_then(Value::as_bool)
    }
}

/// Scope declaration: local overrides plus the subtree that sees them
///
/// Transparent apart from the context it publishes; children render as if
/// the scope were a fragment.
#[derive(Debug, Clone, Default)]
pub struct ScopeNode {
    overrides: ScopeOverrides,
    children: Vec<Node>,
}

impl ScopeNode {
    /// Scope with explicit overrides
    #[inline]
    #[must_use]
    pub fn new(overrides: ScopeOverrides) -> Self {
        Self {
            overrides,
            children: Vec::new(),
        }
    }

    /// Scope contributing a name segment
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ScopeOverrides::named(name))
    }

    /// Scope built from a loosely-typed property map
    ///
    /// # Errors
    /// Returns the [`ScopeError`] for a malformed `name` or `readOnly`
    pub fn from_props(props: &Attributes) -> Result<Self, ScopeError> {
        ScopeOverrides::from_props(props).map(Self::new)
    }

    /// Set the read-only override
    #[inline]
    #[must_use]
    pub fn read_only(mut self, read_only: impl Into<ReadOnly>) -> Self {
        self.overrides.read_only = read_only.into();
        self
    }

    /// Add a shared attribute
    ///
    /// `name` and `readOnly` set the matching override instead; malformed
    /// values for them fail when the scope is rendered.
    #[inline]
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.set_attr(key, value);
        self
    }

    /// Append a child
    #[inline]
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append children
    #[inline]
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Local overrides
    #[inline]
    #[must_use]
    pub fn overrides(&self) -> &ScopeOverrides {
        &self.overrides
    }

    /// Declared children
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }
}

type RenderFn = dyn Fn(&mut Scope<'_>) -> Result<Node, TreeError> + Send + Sync;

/// Caller code run during the render pass
///
/// Receives a [`Scope`] handle for reading the nearest context and returns
/// the subtree to render in its place.
#[derive(Clone)]
pub struct Component {
    label: String,
    render: Arc<RenderFn>,
}

impl Component {
    /// Create component
    pub fn new<F>(label: impl Into<String>, render: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<Node, TreeError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            render: Arc::new(render),
        }
    }

    /// Label used in logs and errors
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn render(&self, scope: &mut Scope<'_>) -> Result<Node, TreeError> {
        (self.render)(scope)
    }
}

impl Debug for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
