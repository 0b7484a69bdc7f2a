//! Wrapper adapters
//!
//! Turn a plain target constructor (props in, node out) into one that
//! resolves its `name` against the nearest scope first.
//!
//! - [`with_scope`]: forwards inherited attributes, the resolved
//!   `readOnly` and the caller's props, with `name` set to the full name
//! - [`with_full_name`]: legacy shape, forwards the caller's props untouched
//!   plus a `fullName` prop

use crate::error::TreeError;
use crate::node::Node;
use crate::render::Scope;
use fieldscope_core::{keys, resolve_read_only, Attributes, ReadOnly, ScopeError, ScopeOverrides};
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Target constructor: forwarded props in, subtree out
pub type Constructor = Arc<dyn Fn(Attributes) -> Result<Node, TreeError> + Send + Sync>;

/// Scope-aware constructor produced by [`with_scope`]
#[derive(Clone)]
pub struct WithScope {
    label: String,
    target: Constructor,
}

/// Wrap `target` so its nodes resolve their name against the nearest scope
///
/// # Example
///
/// ```rust
/// use fieldscope_core::Attributes;
/// use fieldscope_tree::{with_scope, Node, Renderer, ScopeNode};
///
/// let field = with_scope("Field", |props| Ok(Node::element("input", props)));
/// let tree: Node = ScopeNode::named("user")
///     .child(field.node(Attributes::new().with("name", "email")))
///     .into();
///
/// let rendered = Renderer::new().render(&tree).unwrap();
/// assert_eq!(rendered.names(), vec!["user.email"]);
/// ```
pub fn with_scope<F>(label: impl Into<String>, target: F) -> WithScope
where
    F: Fn(Attributes) -> Result<Node, TreeError> + Send + Sync + 'static,
{
    WithScope {
        label: label.into(),
        target: Arc::new(target),
    }
}

impl WithScope {
    /// Node declared with `props`
    ///
    /// `props` may carry `name` (string) and `readOnly` (boolean); both are
    /// validated when the node is rendered.
    #[must_use]
    pub fn node(&self, props: Attributes) -> Node {
        self.node_with(props, ReadOnly::Unset)
    }

    /// Node declared with `props` and a read-only override
    ///
    /// A set `read_only` takes precedence over a `readOnly` prop.
    #[must_use]
    pub fn node_with(&self, props: Attributes, read_only: ReadOnly) -> Node {
        let target = Arc::clone(&self.target);
        Node::component(self.label.clone(), move |scope: &mut Scope<'_>| {
            let own = ScopeOverrides::from_props(&props)?;
            let read_only = resolve_read_only(&read_only, &own.read_only);
            let query = scope.use_scope_with(own.name.as_deref(), &read_only)?;

            let mut forwarded = query
                .inherited_props
                .merged(&props)
                .without(keys::NAME)
                .without(keys::READ_ONLY);
            if let Some(flag) = query.read_only {
                forwarded.insert(keys::READ_ONLY, flag);
            }
            if !query.full_name.is_empty() {
                forwarded.insert(keys::NAME, query.full_name.into_string());
            }
            target(forwarded)
        })
    }

    /// Label used in logs and errors
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Debug for WithScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithScope")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Legacy constructor produced by [`with_full_name`]
#[derive(Clone)]
#[deprecated(since = "0.4.0", note = "use `with_scope`, which also forwards inherited attributes")]
pub struct WithFullName {
    label: String,
    target: Constructor,
}

/// Wrap `target` so its nodes receive a `fullName` prop
///
/// Props are forwarded as given; nothing inherited is added.
#[deprecated(since = "0.4.0", note = "use `with_scope`, which also forwards inherited attributes")]
#[allow(deprecated)]
pub fn with_full_name<F>(label: impl Into<String>, target: F) -> WithFullName
where
    F: Fn(Attributes) -> Result<Node, TreeError> + Send + Sync + 'static,
{
    WithFullName {
        label: label.into(),
        target: Arc::new(target),
    }
}

#[allow(deprecated)]
impl WithFullName {
    /// Node declared with `props`
    #[must_use]
    pub fn node(&self, props: Attributes) -> Node {
        let target = Arc::clone(&self.target);
        Node::component(self.label.clone(), move |scope: &mut Scope<'_>| {
            let name = match props.get(keys::NAME) {
                None | Some(Value::Null) => None,
                Some(Value::String(name)) => Some(name.as_str()),
                Some(other) => return Err(ScopeError::malformed_name(other).into()),
            };
            let query = scope.use_scope(name)?;
            target(props.clone().with(keys::FULL_NAME, query.full_name.into_string()))
        })
    }
}

#[allow(deprecated)]
impl Debug for WithFullName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithFullName")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
